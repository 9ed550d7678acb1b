use chrono::{DateTime, FixedOffset, NaiveDate};
use log::debug;

use crate::{error::PostError, metadata::PostRequest};

mod data;
mod utils;

pub(crate) use data::{FormattedPost, FrontMatter};
pub(crate) use utils::{format_list, format_utc_offset, format_value, sanitize_key, slugify};

/// `YYYY-MM-DD-slug.md`
pub(crate) fn post_filename(title: &str, date: NaiveDate) -> String {
    format!("{}-{}.md", date.format("%Y-%m-%d"), slugify(title))
}

/// Wall clock of `now` followed by its offset: `2024-03-15 10:00:00 +0000`.
pub(crate) fn format_date(now: &DateTime<FixedOffset>) -> String {
    let minutes_behind_utc = -now.offset().local_minus_utc() / 60;
    format!(
        "{} {}",
        now.format("%Y-%m-%d %H:%M:%S"),
        format_utc_offset(minutes_behind_utc)
    )
}

pub(crate) fn front_matter(request: &PostRequest, now: &DateTime<FixedOffset>) -> FrontMatter {
    let mut fm = FrontMatter::default();
    fm.push("layout", request.layout.as_str());
    fm.push("title", format!("\"{}\"", request.title.replace('"', "\\\"")));
    fm.push("date", format_date(now));

    if !request.categories.trim().is_empty() {
        fm.push("categories", format_list(&request.categories));
    }
    if !request.tags.trim().is_empty() {
        fm.push("tags", format_list(&request.tags));
    }

    for (raw_key, value) in request.additional_options.iter() {
        match sanitize_key(raw_key) {
            Some(key) => fm.push(key, format_value(value)),
            None => debug!("dropping option with unusable key {raw_key:?}"),
        }
    }

    fm
}

/// Builds the filename and file content. `now` decides both the filename date
/// and the `date:` field, so the two always agree.
pub(crate) fn format_post(
    request: &PostRequest,
    now: &DateTime<FixedOffset>,
) -> Result<FormattedPost, PostError> {
    if request.title.trim().is_empty() {
        return Err(PostError::EmptyTitle);
    }

    Ok(FormattedPost {
        filename: post_filename(&request.title, now.date_naive()),
        content: front_matter(request, now).render(),
    })
}
