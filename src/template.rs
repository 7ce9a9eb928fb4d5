//! `{{ name }}` placeholder substitution for the README template.

use regex::{NoExpand, Regex};

use crate::aggregate::AggregateResult;
use crate::format::{NumberFormatter, PercentFormatter};

pub const DOWNLOADS_COUNT: &str = "downloadsCount";
pub const AVG_QUALITY: &str = "avgQuality";
pub const CODE_COV: &str = "codeCov";
pub const TODAY_DATE: &str = "todayDate";

/// Builds a matcher for `{{ name }}` with any amount of whitespace inside the braces.
pub fn placeholder_regex(name: &str) -> Regex {
    let pattern = format!(r"\{{\{{\s*{}\s*\}}\}}", regex::escape(name));
    // The name is escaped, so the pattern is always valid.
    Regex::new(&pattern).expect("placeholder pattern is valid")
}

/// Replaces the four known placeholders in a template.
///
/// Any other `{{ ... }}` token is left as is.
#[derive(Debug)]
pub struct Renderer {
    numbers: NumberFormatter,
    percents: PercentFormatter,
    downloads_count: Regex,
    avg_quality: Regex,
    code_cov: Regex,
    today_date: Regex,
}

impl Renderer {
    pub fn new(numbers: NumberFormatter, percents: PercentFormatter) -> Self {
        Self {
            numbers,
            percents,
            downloads_count: placeholder_regex(DOWNLOADS_COUNT),
            avg_quality: placeholder_regex(AVG_QUALITY),
            code_cov: placeholder_regex(CODE_COV),
            today_date: placeholder_regex(TODAY_DATE),
        }
    }

    pub fn render(&self, template: &str, result: &AggregateResult) -> String {
        let substitutions = [
            (&self.downloads_count, self.numbers.format(result.total_downloads)),
            (&self.avg_quality, self.percents.format(result.average_quality)),
            (&self.code_cov, self.percents.format(result.average_coverage)),
            (&self.today_date, result.generated_date.clone()),
        ];

        substitutions
            .into_iter()
            .fold(template.to_string(), |text, (pattern, value)| {
                pattern.replace_all(&text, NoExpand(value.as_str())).into_owned()
            })
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(NumberFormatter::default(), PercentFormatter::new())
    }
}
