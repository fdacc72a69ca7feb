use crate::{or_fallback, Job, JobId, NOT_AVAILABLE};

/// Named string parameters carried by a screen transition.
pub type RouteParams = Vec<(&'static str, String)>;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Route {
    #[default]
    Feed,
    Bookmarks,
    /// Detail screen; it reads its fields back out of the pairs.
    Detail(RouteParams),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub route: Route,
    pub feed: FeedViewModel,
    pub bookmarks: BookmarksViewModel,
    pub notice: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeedViewModel {
    pub rows: Vec<JobRowView>,
    /// Nothing shown yet and the first page is still pending.
    pub initial_loading: bool,
    pub fetching_more: bool,
    pub has_more: bool,
    pub next_page: u32,
    pub last_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookmarksViewModel {
    pub rows: Vec<JobRowView>,
    pub loading: bool,
    pub empty: bool,
}

/// One list row with every fallback already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub job_id: JobId,
    pub company: String,
    pub title: String,
    pub place: String,
    pub salary: String,
    pub phone: String,
    pub bookmarked: bool,
}

impl JobRowView {
    pub fn from_job(job: &Job, bookmarked: bool) -> Self {
        Self {
            job_id: job.id,
            company: job.display_company(),
            title: job.display_title(),
            place: job.primary_details.display_place(),
            salary: job.primary_details.display_salary(),
            phone: job.display_phone(),
            bookmarked,
        }
    }
}

/// Navigation parameters handed to the detail screen.
///
/// Travels as flat string pairs rather than a record; every value is
/// pre-substituted with its fallback so the receiving screen shows them as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDetailParams {
    pub id: String,
    pub company_name: String,
    pub title: String,
    pub place: String,
    pub salary: String,
    pub job_type: String,
    pub experience: String,
    pub qualification: String,
    pub fees: String,
    pub whatsapp_no: String,
}

impl JobDetailParams {
    pub fn from_job(job: &Job) -> Self {
        let details = &job.primary_details;
        Self {
            id: job.id.to_string(),
            company_name: job.display_company(),
            title: job.display_title(),
            place: details.display_place(),
            salary: details.display_salary(),
            job_type: details.display_job_type(),
            experience: details.display_experience(),
            qualification: details.display_qualification(),
            fees: details.display_fees(),
            whatsapp_no: job.display_phone(),
        }
    }

    pub fn to_params(&self) -> RouteParams {
        vec![
            ("id", self.id.clone()),
            ("company_name", self.company_name.clone()),
            ("title", self.title.clone()),
            ("place", self.place.clone()),
            ("salary", self.salary.clone()),
            ("jobType", self.job_type.clone()),
            ("experience", self.experience.clone()),
            ("qualification", self.qualification.clone()),
            ("fees", self.fees.clone()),
            ("whatsapp_no", self.whatsapp_no.clone()),
        ]
    }

    /// Reads the pairs a detail route carries.
    pub fn from_route_params(params: &[(&'static str, String)]) -> Self {
        Self::from_params(params.iter().map(|(key, value)| (*key, value.as_str())))
    }

    /// Reads parameters back by name; names that are missing or blank read as `N/A`.
    pub fn from_params<'a, I>(params: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let params: Vec<(&str, &str)> = params.into_iter().collect();
        let lookup = |name: &str| {
            let value = params
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| *value);
            or_fallback(value, NOT_AVAILABLE)
        };
        Self {
            id: lookup("id"),
            company_name: lookup("company_name"),
            title: lookup("title"),
            place: lookup("place"),
            salary: lookup("salary"),
            job_type: lookup("jobType"),
            experience: lookup("experience"),
            qualification: lookup("qualification"),
            fees: lookup("fees"),
            whatsapp_no: lookup("whatsapp_no"),
        }
    }
}
