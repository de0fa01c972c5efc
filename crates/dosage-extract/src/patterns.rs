//! Compiled pattern library for timing-phrase recognition.
//!
//! All patterns are compiled once into `LazyLock` statics. The
//! frequency/period pattern is by far the most intricate; its capture
//! groups are documented below and the extractor depends on their exact
//! semantics, so alternation order must not be rearranged.

use std::sync::LazyLock;

use regex::Regex;

/// Frequency and period phrases ("3-4 times a day", "every other day",
/// "once daily", "q6h" pre-expanded to "every 6 hours", bare "daily").
///
/// Case-insensitive and multi-line. Named groups (all optional):
/// - `freq`: frequency count ("3" in "3 times a day")
/// - `freq_max`: upper frequency count for ranges in the form "x-y times"
/// - `adverb`: the special adverbs once, twice, thrice
/// - `every`: always contains "every" when present, implying a frequency
///   of 1; contains "other" when the period doubles ("every other day")
/// - `other`: separator contained the word "other" — period doubles
/// - `period`: period length (may need `period_max` appended when no
///   range dash matched; see extractor)
/// - `range`: the dash of a period range; when absent, a lone period
///   number lands in `period_max` and must be merged into `period`
/// - `period_max`: upper period length for ranges ("4-6 hours"), or the
///   sole period number when `range` is absent
/// - `unit`: the time-period unit word (hours, days, weekday names, one
///   letter abbreviations, or a `-ly` adverb)
/// - `bare_ly`: a standalone `-ly` adverb with no leading count
///   ("daily"), usable as frequency 1 per 1 unit
/// - `bare_adverb`: a standalone once/twice/thrice with no period at all
///   ("twice"); yields a frequency only, so that a later weekday overlay
///   can multiply it
pub static FREQ_PERIOD: LazyLock<Regex> = LazyLock::new(|| {
    const NUM: &str = "(?:one|two|three|four|five|six|seven|eight|nine|ten|[.0-9]+)";
    let pattern = format!(
        // Header: numeric count, count range, special adverb, or "every (other)"
        "(?im)(?:(?:(?P<freq>{NUM})(?:-(?P<freq_max>{NUM}))? times?\
         |(?:(?P<adverb>once|twice|thrice) ?-? ?)\
         |[.0-9]\
         |(?P<every>every(?:[ -]other)?))\
         (?:[ -]a[ -]| ?/ ?|[ -]every[ -](?P<other>other[ -])?|[ -]per[ -]|[ -]|)\
         (?:(?:(?:(?P<period>{NUM})?(?P<range>-)?(?P<period_max>{NUM}) ?)?\
         (?P<unit>hourly|daily|monthly|weekly|yearly\
         |day|hour|week|month|year|second|minute\
         |monday|tuesday|wednesday|thursday|friday|saturday|sunday\
         |d\\b|m\\b|y\\b|s\\b|h\\b|w\\b))s?))\
         |(?P<bare_ly>hourly|daily|monthly|weekly|yearly)\
         |(?P<bare_adverb>once|twice|thrice)"
    );
    Regex::new(&pattern).expect("frequency/period pattern must compile")
});

/// Weekday-list phrases ("on mondays, tuesdays, and wednesdays").
///
/// Run against the whole covering sentence, since imported time
/// annotations are not reliable enough to scope this tighter.
/// - `other`: present when "every other" leads the phrase (period
///   becomes 2 weeks)
/// - `days`: comma/space/dash separated list of weekday words
pub static PERIOD_WEEKDAYS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("(?im)(?:on|every (?P<other>other)?)(?P<days>(?:[, -]+?(?:and )?[montuewdhfrisa]{3,6}days?)+)")
        .expect("weekday-list pattern must compile")
});

/// Single weekday word parser; `day` holds the weekday stem whose first
/// three letters form the FHIR code.
pub static WEEKDAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("(?i)(?P<day>[montuewdhfrisa]{3,6})days?").expect("weekday pattern must compile")
});

/// Meal/sleep/waking event phrases ("before breakfast", "with meals",
/// "at bedtime"). Applied to pre-lowercased text.
/// - `op`: before, after, at, during, every, with, on
/// - `event`: breakfast, lunch, dinner, meal(s), sleep, bedtime, waking
pub static TIMING_EVENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("(?P<op>before|after|at|during|every|with|on)(?: )+(?P<event>breakfast|lunch|dinner|meals?|sleep|bedtime|waking)")
        .expect("timing-events pattern must compile")
});

/// Time-of-day phrases ("in the morning", "at night"). Applied to
/// pre-lowercased text; `time` holds the time-of-day word.
pub static TIME_OF_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("(?:at|in the|every|during the)(?: )+(?P<time>morning|afternoon|evening|night)")
        .expect("time-of-day pattern must compile")
});

/// Separator of a dose range ("1-2 tablets", "1 to 2 tablets").
pub static DOSE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("-| to ").expect("dose-range pattern must compile")
});

/// "Current as of {date}" statements used to anchor medication-list
/// sections.
pub static CURRENT_AS_OF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:are the (?:[\w|\s]+) as of|evaluated on)")
        .expect("current-as-of pattern must compile")
});

/// Restricted ISO-8601-like duration strings as emitted by the temporal
/// annotator (`P3D`, `PT12H`, `R1P24H`). The week designator is not part
/// of the standard but appears in annotator output, and the repeat-count
/// prefix of SET expressions (`R1P...`) is consumed before the unit
/// designators. Each unit group holds the numeric value for that unit.
pub static TIMEX_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        "(?i)[rp]+(?:[.0-9]+[rp]+)*(?:(?P<years>[.0-9]+)y)?(?:(?P<months>[.0-9]+)m)?\
         (?:(?P<weeks>[.0-9]+)w)?(?:(?P<days>[.0-9]+)d)?t?(?:(?P<hours>[.0-9]+)h)?\
         (?:(?P<minutes>[.0-9]+)m)?(?:(?P<seconds>[.0-9]+)s)?",
    )
    .expect("timex-duration pattern must compile")
});
