use crate::refs::{ObjectReferences, RefType};
use chrono::{DateTime, Datelike, Local, Offset, TimeZone, Timelike};
use pdf_writer::{Date as PDate, Pdf, TextStr};

/// Document metadata written to the PDF info dictionary
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Info {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
}

impl Info {
    pub fn new() -> Info {
        Info::default()
    }

    pub fn title<S: ToString>(&mut self, title: S) -> &mut Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn author<S: ToString>(&mut self, author: S) -> &mut Self {
        self.author = Some(author.to_string());
        self
    }

    /// Describe a finished sheet run in the subject line
    pub fn batch(&mut self, badges: usize, pages: usize) -> &mut Self {
        let plural = |n: usize, word: &str| {
            if n == 1 {
                format!("{n} {word}")
            } else {
                format!("{n} {word}s")
            }
        };
        self.subject = Some(format!(
            "{} on {}",
            plural(badges, "badge"),
            plural(pages, "sheet")
        ));
        self
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let id = refs.gen(RefType::Info);
        let mut info = writer.document_info(id);

        if let Some(title) = &self.title {
            info.title(TextStr(title.as_str()));
        }
        if let Some(author) = &self.author {
            info.author(TextStr(author.as_str()));
        }
        if let Some(subject) = &self.subject {
            info.subject(TextStr(subject.as_str()));
        }
        info.creator(TextStr(concat!(
            env!("CARGO_PKG_NAME"),
            " v",
            env!("CARGO_PKG_VERSION")
        )));
        info.creation_date(pdf_date(&Local::now()));
    }
}

/// Convert a timestamp to a PDF date, keeping its UTC offset
fn pdf_date<Tz: TimeZone>(at: &DateTime<Tz>) -> PDate {
    let offset = at.offset().fix().local_minus_utc();
    let offset_hours = offset / (60 * 60);
    let offset_minutes = ((offset - offset_hours * 60 * 60) / 60).abs();
    PDate::new(at.year() as u16)
        .month(at.month() as u8)
        .day(at.day() as u8)
        .hour(at.hour() as u8)
        .minute(at.minute() as u8)
        .second(at.second() as u8)
        .utc_offset_hour(offset_hours as i8)
        .utc_offset_minute(offset_minutes as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn batch_subject_counts_badges_and_sheets() {
        let mut info = Info::new();
        info.batch(1, 1);
        assert_eq!(info.subject.as_deref(), Some("1 badge on 1 sheet"));
        info.batch(250, 25);
        assert_eq!(info.subject.as_deref(), Some("250 badges on 25 sheets"));
    }

    #[test]
    fn dates_keep_their_offset() {
        let tz = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
        let at = tz.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        let expected = PDate::new(2024)
            .month(3)
            .day(9)
            .hour(14)
            .minute(5)
            .second(0)
            .utc_offset_hour(5)
            .utc_offset_minute(30);
        assert_eq!(pdf_date(&at), expected);
    }
}
