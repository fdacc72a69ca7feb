use jobboard_core::{AppViewModel, FeedViewModel, JobDetailParams, JobRowView, Route};

use super::constants::*;

pub fn render(view: &AppViewModel) -> String {
    let mut out = match &view.route {
        Route::Feed => render_feed(&view.feed),
        Route::Bookmarks => render_bookmarks(view),
        Route::Detail(params) => render_detail(&JobDetailParams::from_route_params(params)),
    };
    if let Some(notice) = &view.notice {
        out.push_str(&format!("! {notice}\n"));
    }
    out
}

fn render_feed(feed: &FeedViewModel) -> String {
    if feed.initial_loading {
        return "Loading jobs...\n".to_string();
    }

    let mut out = String::new();
    for row in &feed.rows {
        out.push_str(&format_row(row));
    }

    if feed.fetching_more {
        out.push_str("Loading more...\n");
    } else if let Some(error) = &feed.last_error {
        out.push_str(&format!("Could not load {error}. Type `more` to retry.\n"));
    } else if !feed.has_more {
        out.push_str(&format!("End of feed ({} jobs).\n", feed.rows.len()));
    } else {
        out.push_str(&format!(
            "{} jobs shown. Type `more` for page {}.\n",
            feed.rows.len(),
            feed.next_page
        ));
    }
    out
}

fn render_bookmarks(view: &AppViewModel) -> String {
    let bookmarks = &view.bookmarks;
    if bookmarks.loading {
        return "Loading bookmarks...\n".to_string();
    }
    if bookmarks.empty {
        return format!("{EMPTY_BOOKMARKS}\n");
    }
    bookmarks.rows.iter().map(format_row).collect()
}

fn render_detail(params: &JobDetailParams) -> String {
    let fields = [
        ("Company", &params.company_name),
        ("Title", &params.title),
        ("Place", &params.place),
        ("Salary", &params.salary),
        ("Job type", &params.job_type),
        ("Experience", &params.experience),
        ("Qualification", &params.qualification),
        ("Fees", &params.fees),
        ("Phone", &params.whatsapp_no),
    ];
    let mut out = format!("Job description #{}\n", params.id);
    for (label, value) in fields {
        out.push_str(&format!("  {label:<14}{value}\n"));
    }
    out
}

fn format_row(row: &JobRowView) -> String {
    let mark = if row.bookmarked {
        BOOKMARKED_MARK
    } else {
        NOT_BOOKMARKED_MARK
    };
    format!(
        "{mark} #{id} {company} - {title}\n      {place} | {salary} | {phone}\n",
        id = row.job_id,
        company = row.company,
        title = row.title,
        place = row.place,
        salary = row.salary,
        phone = row.phone,
    )
}
