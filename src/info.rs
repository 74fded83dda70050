use std::{collections::HashMap, sync::Arc};

use scraper::Html;

use crate::error::{Error, Result};
use crate::timetable::models::InstructorInfo;
use crate::utils::{get_webpage, select_one, selector, text_of};

/// Domain appended to usernames to build emails
const EMAIL_DOMAIN: &str = "calpoly.edu";

/// Instructor pages already fetched during the run, keyed by their absolute URL
#[derive(Debug, Default)]
pub struct InstructorCache {
    entries: HashMap<String, Arc<InstructorInfo>>,
}

impl InstructorCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<Arc<InstructorInfo>> {
        self.entries.get(url).cloned()
    }

    pub fn insert(&mut self, url: impl Into<String>, info: InstructorInfo) -> Arc<InstructorInfo> {
        let info = Arc::new(info);
        self.entries.insert(url.into(), Arc::clone(&info));
        info
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the cached instructor, fetching its page the first time
    pub async fn get_or_fetch(
        &mut self,
        client: &reqwest::Client,
        name: &str,
        url: &str,
    ) -> Result<Arc<InstructorInfo>> {
        if let Some(info) = self.get(url) {
            log::debug!("Cache hit for {name} ({url})");
            return Ok(info);
        }

        log::info!("Fetching instructor page of {name}");
        let document = get_webpage(client, url).await?;
        let info = parse_instructor(name, &document)?;

        Ok(self.insert(url, info))
    }
}

/// Read the contact details out of an instructor page.
///
/// The `span.alias` element reads `"{office} * {username}"` and may hold
/// an anchor with the phone number, whose last dotted group is the extension.
pub fn parse_instructor(name: &str, document: &Html) -> Result<InstructorInfo> {
    let sel_alias = selector("span.alias");
    let sel_a = selector("a");

    let alias = select_one(document.root_element(), &sel_alias, "span.alias on instructor page")?;

    let ext = alias
        .select(&sel_a)
        .next()
        .map(|phone| {
            let phone = text_of(phone);
            let last = phone.rsplit('.').next().unwrap_or_default().trim().to_owned();
            format!("x6-{last}")
        })
        .unwrap_or_default();

    let text = text_of(alias);
    let (office, rest) = text.split_once('*').ok_or_else(|| {
        Error::html_parse(format!("alias of {name} has no `*` separator: {text:?}"))
    })?;

    let username = rest.split_whitespace().next().unwrap_or_default();
    let email = if username.is_empty() {
        String::new()
    } else {
        format!("{username}@{EMAIL_DOMAIN}")
    };

    Ok(InstructorInfo {
        name: name.to_owned(),
        ext,
        email,
        office_location: office.trim().to_owned(),
    })
}
