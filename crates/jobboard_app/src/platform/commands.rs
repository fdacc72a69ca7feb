use jobboard_core::{JobId, Msg};

/// One line typed at the interactive prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    More,
    Open(JobId),
    Back,
    Toggle(JobId),
    Saved,
    Feed,
    Clear,
    Help,
    Quit,
}

impl UserCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err("empty command".to_string());
        };
        let command = match verb.to_ascii_lowercase().as_str() {
            "more" | "m" => Self::More,
            "open" | "o" => Self::Open(parse_id(words.next())?),
            "back" | "b" => Self::Back,
            "save" | "s" => Self::Toggle(parse_id(words.next())?),
            "saved" => Self::Saved,
            "feed" | "f" => Self::Feed,
            "clear" => Self::Clear,
            "help" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            other => return Err(format!("unknown command {other:?}; type `help`")),
        };
        if let Some(extra) = words.next() {
            return Err(format!("unexpected argument {extra:?}"));
        }
        Ok(command)
    }

    /// Message for the state machine; `None` for commands the prompt handles itself.
    pub fn into_msg(self) -> Option<Msg> {
        match self {
            Self::More => Some(Msg::ScrolledNearEnd),
            Self::Open(job_id) => Some(Msg::JobOpened { job_id }),
            Self::Back => Some(Msg::BackClicked),
            Self::Toggle(job_id) => Some(Msg::BookmarkClicked { job_id }),
            Self::Saved => Some(Msg::BookmarksScreenFocused),
            Self::Feed => Some(Msg::FeedFocused),
            Self::Clear => Some(Msg::ClearBookmarksClicked),
            Self::Help | Self::Quit => None,
        }
    }
}

fn parse_id(word: Option<&str>) -> Result<JobId, String> {
    let word = word.ok_or_else(|| "missing job id".to_string())?;
    word.trim_start_matches('#')
        .parse()
        .map_err(|_| format!("{word:?} is not a job id"))
}
