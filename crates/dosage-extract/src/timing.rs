//! The timing-extraction cascade.
//!
//! Given a drug mention's attribute spans and the document context, the
//! extractor builds a [`Timing`] record through a fixed sequence of steps:
//! frequency-pattern parsing (or a schedule-timestamp fallback), a set of
//! overlays (as-needed, weekday list, meal events, time of day), duration
//! handling, and a final timing-abbreviation lookup. Later steps may
//! overwrite fields written by earlier ones; every write is recorded in an
//! audit trail so the last-writer-wins precedence stays observable.

use dosage_types::{
    find_attribute, AttributeSpan, AttributeTag, BoundedDuration, CodedConcept, EventOffset,
    EventTiming, Spanned, TextSpan, TimestampAnnotation, TimexType, Timing, TimingEvent,
    TimingRepeat, UnitOfTime, Weekday,
};
use tracing::{debug, trace};

use crate::context::DocumentContext;
use crate::{number, patterns, timex, unit};

/// A field of the output a cascade step can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputField {
    /// `repeat.frequency`
    Frequency,
    /// `repeat.frequencyMax`
    FrequencyMax,
    /// `repeat.period`
    Period,
    /// `repeat.periodMax`
    PeriodMax,
    /// `repeat.periodUnit`
    PeriodUnit,
    /// `repeat.dayOfWeek`
    DayOfWeek,
    /// `repeat.when`
    When,
    /// `repeat.duration`
    Duration,
    /// `repeat.durationUnit`
    DurationUnit,
    /// `repeat.boundsDuration`
    BoundsDuration,
    /// The instruction's as-needed flag.
    AsNeeded,
    /// The instruction's free-text fallback.
    Text,
    /// The derived timing-abbreviation concept.
    Code,
}

/// A cascade step, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeStep {
    /// Frequency attribute matched the frequency/period pattern.
    FrequencyPattern,
    /// Schedule derived from a SET-typed timestamp annotation.
    ScheduleTimexFallback,
    /// "as needed" / "prn" overlay.
    AsNeededOverlay,
    /// Weekday-list overlay.
    WeekdayOverlay,
    /// Meal/sleep/waking event overlay.
    EventOverlay,
    /// Time-of-day overlay.
    TimeOfDayOverlay,
    /// Duration parsed from the duration attribute.
    DurationAttribute,
    /// Duration derived from a DURATION-typed timestamp annotation.
    DurationTimexFallback,
    /// Unstructured text preserved because nothing else fired.
    TextFallback,
    /// GTS timing-abbreviation lookup.
    AbbreviationLookup,
}

/// One audit record: a step and the fields it wrote (including fields it
/// cleared).
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    /// The step that ran.
    pub step: CascadeStep,
    /// Fields written by the step.
    pub touched: Vec<OutputField>,
}

/// The complete output of the cascade for one drug mention.
#[derive(Debug, Clone)]
pub struct TimingExtraction {
    /// The assembled timing record.
    pub timing: Timing,
    /// As-needed flag, when detected.
    pub as_needed: Option<Spanned<bool>>,
    /// Free-text fallback, when nothing structured fired.
    pub text: Option<Spanned<String>>,
    /// Accumulated instruction span; `(0, 0)` when nothing positioned it.
    pub span: TextSpan,
    /// Audit trail of field writes, in step order.
    pub audit: Vec<AuditEntry>,
}

impl TimingExtraction {
    /// The step that last wrote `field`, if any did.
    pub fn last_writer(&self, field: OutputField) -> Option<CascadeStep> {
        self.audit
            .iter()
            .rev()
            .find(|e| e.touched.contains(&field))
            .map(|e| e.step)
    }
}

/// Mutable state threaded through the cascade.
struct CascadeState {
    repeat: TimingRepeat,
    code: Option<CodedConcept>,
    span: TextSpan,
    as_needed: Option<Spanned<bool>>,
    text: Option<Spanned<String>>,
    audit: Vec<AuditEntry>,
}

impl CascadeState {
    fn new() -> Self {
        Self {
            repeat: TimingRepeat::new(),
            code: None,
            span: TextSpan::EMPTY,
            as_needed: None,
            text: None,
            audit: Vec::new(),
        }
    }

    fn record(&mut self, step: CascadeStep, touched: Vec<OutputField>) {
        if !touched.is_empty() {
            self.audit.push(AuditEntry { step, touched });
        }
    }
}

/// Runs the timing cascade against one document.
///
/// # Examples
///
/// ```
/// use dosage_extract::context::DocumentContext;
/// use dosage_extract::timing::TimingExtractor;
/// use dosage_types::{AttributeSpan, AttributeTag, TextSpan};
///
/// let text = "every 6 hours";
/// let ctx = DocumentContext::new(text, vec![TextSpan::new(0, 13)], vec![]);
/// let attrs = vec![AttributeSpan::new(
///     AttributeTag::Frequency,
///     TextSpan::new(0, 13),
///     text,
/// )];
/// let out = TimingExtractor::new(&ctx).extract(TextSpan::new(0, 13), &attrs);
/// assert_eq!(out.timing.repeat.frequency.unwrap().value, 1.0);
/// assert_eq!(out.timing.repeat.period.unwrap().value, 6.0);
/// ```
pub struct TimingExtractor<'a> {
    ctx: &'a DocumentContext,
}

impl<'a> TimingExtractor<'a> {
    /// Creates an extractor over a document context.
    pub fn new(ctx: &'a DocumentContext) -> Self {
        Self { ctx }
    }

    /// Extracts timing information for one drug mention.
    ///
    /// `drug_span` anchors the timestamp fallbacks to the sentences
    /// covering the mention; `attrs` are the mention's attribute spans.
    pub fn extract(&self, drug_span: TextSpan, attrs: &[AttributeSpan]) -> TimingExtraction {
        let mut state = CascadeState::new();
        let freq_attr = find_attribute(AttributeTag::Frequency, attrs);
        match freq_attr {
            Some(attr) => {
                if let Some(caps) = patterns::FREQ_PERIOD.captures(attr.covered_text()) {
                    self.apply_frequency_pattern(&mut state, attr, &caps);
                    self.apply_overlays(&mut state, attr.covered_text(), attr.span, Some(attr.span));
                } else {
                    let fallback = self.apply_schedule_fallback(&mut state, drug_span).is_some();
                    let overlays =
                        self.apply_overlays(&mut state, attr.covered_text(), attr.span, Some(attr.span));
                    if !fallback && !overlays {
                        debug!(text = attr.covered_text(), "frequency attribute matched no rule");
                        state.text =
                            Some(Spanned::new(attr.covered_text().to_string(), attr.span));
                        state.record(CascadeStep::TextFallback, vec![OutputField::Text]);
                    }
                }
            }
            None => {
                if let Some(time) = self.apply_schedule_fallback(&mut state, drug_span) {
                    let raw = self.ctx.covered_text(time.span).to_string();
                    self.apply_overlays(&mut state, &raw, time.span, None);
                }
            }
        }
        self.apply_duration(&mut state, drug_span, attrs, freq_attr.is_some());
        derive_abbreviation(&mut state);
        let CascadeState {
            repeat,
            code,
            span,
            as_needed,
            text,
            audit,
        } = state;
        TimingExtraction {
            timing: Timing { repeat, code, span },
            as_needed,
            text,
            span,
            audit,
        }
    }

    /// Parses the frequency/period pattern match into the repeat record.
    fn apply_frequency_pattern(
        &self,
        state: &mut CascadeState,
        attr: &AttributeSpan,
        caps: &regex::Captures<'_>,
    ) {
        let base = attr.span.begin;
        let abs = |m: regex::Match<'_>| TextSpan::new(base + m.start(), base + m.end());
        state.span = attr.span;
        let mut touched = Vec::new();

        let mut freq_text = caps.name("freq").map(|m| m.as_str().to_string());
        let mut freq_span = caps.name("freq").map(abs).unwrap_or(attr.span);
        if freq_text.is_none() {
            if let Some(every) = caps.name("every") {
                // "every" by itself means once per period
                freq_text = Some("1".to_string());
                freq_span = abs(every);
            } else if let Some(adverb) = caps.name("adverb").or_else(|| caps.name("bare_adverb")) {
                freq_text = Some(adverb.as_str().to_string());
                freq_span = abs(adverb);
            }
        }

        // Without a range dash the sole period number is captured as the
        // range upper bound and folds back into the period.
        let range = caps.name("range").is_some();
        let mut period_text = caps
            .name("period")
            .map(|m| m.as_str())
            .unwrap_or("")
            .to_string();
        let mut period_span = TextSpan::new(
            caps.name("period").map(|m| base + m.start()).unwrap_or(attr.span.begin),
            caps.name("period").map(|m| base + m.end()).unwrap_or(attr.span.end),
        );
        if !range {
            if let Some(pm) = caps.name("period_max") {
                period_text.push_str(pm.as_str());
                period_span = TextSpan::new(period_span.begin.min(base + pm.start()), base + pm.end());
            }
        }

        let mut unit_text = caps.name("unit").map(|m| m.as_str().to_string());
        let unit_span = caps.name("unit").map(abs).unwrap_or(attr.span);
        if let Some(bare) = caps.name("bare_ly") {
            if period_text.is_empty() {
                period_text = "1".to_string();
                unit_text = Some(bare.as_str().to_string());
                period_span = abs(bare);
            }
        }

        if let Some(ft) = &freq_text {
            state.repeat.frequency = Some(Spanned::new(parse_number(ft), freq_span));
            touched.push(OutputField::Frequency);
        }
        if let Some(fm) = caps.name("freq_max") {
            state.repeat.frequency_max = Some(Spanned::new(parse_number(fm.as_str()), abs(fm)));
            touched.push(OutputField::FrequencyMax);
        }
        let period_modify = caps
            .name("every")
            .is_some_and(|m| m.as_str().contains("other"))
            || caps.name("other").is_some();
        if !period_text.is_empty() && unit_text.is_some() {
            let mut value = parse_number(&period_text);
            if period_modify {
                value *= 2.0;
            }
            state.repeat.period = Some(Spanned::new(value, period_span));
            touched.push(OutputField::Period);
            if range {
                if let Some(pm) = caps.name("period_max") {
                    state.repeat.period_max =
                        Some(Spanned::new(parse_number(pm.as_str()), abs(pm)));
                    touched.push(OutputField::PeriodMax);
                }
            }
        } else if unit_text.is_some() {
            // Unit with no count: period defaults to 1, or 2 under "every other"
            let span = match caps.name("every") {
                Some(every) if period_modify => TextSpan::new(base + every.start(), unit_span.end),
                _ => unit_span,
            };
            state.repeat.period =
                Some(Spanned::new(if period_modify { 2.0 } else { 1.0 }, span));
            touched.push(OutputField::Period);
        }
        if let Some(u) = unit_text.as_deref().and_then(unit::normalize_unit) {
            state.repeat.period_unit = Some(Spanned::new(u, unit_span));
            touched.push(OutputField::PeriodUnit);
        }
        state.record(CascadeStep::FrequencyPattern, touched);
    }

    /// Derives a period from a SET-typed timestamp in a covering sentence.
    ///
    /// A round multiple of 24 hours is stated as days; anything else keeps
    /// the unit the timestamp carried.
    fn apply_schedule_fallback(
        &self,
        state: &mut CascadeState,
        anchor: TextSpan,
    ) -> Option<&'a TimestampAnnotation> {
        for time in self.ctx.timestamps_in_covering_sentences(anchor) {
            if time.timex_type != TimexType::Set {
                continue;
            }
            let Some((value, unit)) = timex::reduce_duration(&time.value) else {
                continue;
            };
            trace!(value = %time.value, "schedule derived from timestamp annotation");
            state.span = time.span;
            let (period, period_unit) = if unit == UnitOfTime::Hour && value % 24.0 == 0.0 {
                (value / 24.0, UnitOfTime::Day)
            } else {
                (value, unit)
            };
            state.repeat.period = Some(Spanned::new(period, time.span));
            state.repeat.period_unit = Some(Spanned::new(period_unit, time.span));
            state.record(
                CascadeStep::ScheduleTimexFallback,
                vec![OutputField::Period, OutputField::PeriodUnit],
            );
            return Some(time);
        }
        None
    }

    /// Applies the post-processing overlays in fixed order. Returns true
    /// if any of them fired.
    ///
    /// The event and time-of-day overlays run against the last sentence
    /// covering `weekday_anchor` when one exists, falling back to the
    /// primary text otherwise.
    fn apply_overlays(
        &self,
        state: &mut CascadeState,
        raw_text: &str,
        base: TextSpan,
        weekday_anchor: Option<TextSpan>,
    ) -> bool {
        let mut fired = false;
        let normalized = normalize_overlay_text(raw_text);
        fired |= apply_as_needed(state, &normalized, base);
        let mut event_text = normalized;
        if let Some(anchor) = weekday_anchor {
            for sentence in self.ctx.sentences_covering(anchor) {
                let sentence_text = normalize_overlay_text(self.ctx.covered_text(sentence));
                fired |= apply_weekdays(state, &sentence_text, sentence);
                event_text = sentence_text;
            }
        }
        fired |= apply_event_timing(state, &event_text, base);
        fired |= apply_time_of_day(state, &event_text, base);
        fired
    }

    /// Handles the duration attribute, or falls back to a DURATION-typed
    /// timestamp. With a frequency present the result is a bounds
    /// duration; alone it is a plain elapsed-time duration.
    fn apply_duration(
        &self,
        state: &mut CascadeState,
        anchor: TextSpan,
        attrs: &[AttributeSpan],
        freq_present: bool,
    ) {
        let Some(attr) = find_attribute(AttributeTag::Duration, attrs) else {
            self.apply_duration_fallback(state, anchor, freq_present);
            return;
        };
        state.span.expand(attr.span);
        let tokens: Vec<&str> = attr.covered_text().split([' ', '-']).collect();
        if tokens.len() >= 2 {
            let value = Spanned::new(parse_number(tokens[0]), attr.span);
            let parsed_unit = unit::normalize_unit(tokens[1]);
            if freq_present {
                if let Some(u) = parsed_unit {
                    state.repeat.bounds_duration = Some(BoundedDuration {
                        value,
                        unit: Spanned::new(u, attr.span),
                    });
                    state.record(
                        CascadeStep::DurationAttribute,
                        vec![OutputField::BoundsDuration],
                    );
                }
            } else {
                state.repeat.duration = Some(value);
                let mut touched = vec![OutputField::Duration];
                if let Some(u) = parsed_unit {
                    state.repeat.duration_unit = Some(Spanned::new(u, attr.span));
                    touched.push(OutputField::DurationUnit);
                }
                state.record(CascadeStep::DurationAttribute, touched);
            }
        } else if !self.apply_duration_fallback(state, anchor, freq_present) {
            // Unstructured duration: keep the text rather than dropping it
            let appended = match &state.text {
                Some(t) => format!("{} {}", t.value, attr.covered_text()),
                None => attr.covered_text().to_string(),
            };
            state.text = Some(Spanned::new(appended, attr.span));
            state.span.expand(attr.span);
            state.record(CascadeStep::TextFallback, vec![OutputField::Text]);
        }
    }

    fn apply_duration_fallback(
        &self,
        state: &mut CascadeState,
        anchor: TextSpan,
        freq_present: bool,
    ) -> bool {
        for time in self.ctx.timestamps_in_covering_sentences(anchor) {
            if time.timex_type != TimexType::Duration {
                continue;
            }
            let Some((value, u)) = timex::reduce_duration(&time.value) else {
                continue;
            };
            state.span.expand(time.span);
            let value = Spanned::new(value, time.span);
            if freq_present {
                state.repeat.bounds_duration = Some(BoundedDuration {
                    value,
                    unit: Spanned::new(u, time.span),
                });
                state.record(
                    CascadeStep::DurationTimexFallback,
                    vec![OutputField::BoundsDuration],
                );
            } else {
                state.repeat.duration = Some(value);
                state.repeat.duration_unit = Some(Spanned::new(u, time.span));
                state.record(
                    CascadeStep::DurationTimexFallback,
                    vec![OutputField::Duration, OutputField::DurationUnit],
                );
            }
            return true;
        }
        false
    }
}

/// "as needed" / "prn" detection over the normalized primary text.
fn apply_as_needed(state: &mut CascadeState, covered: &str, base: TextSpan) -> bool {
    let (idx, len) = if let Some(i) = covered.find("as needed") {
        (i, "as needed".len())
    } else if let Some(i) = covered.find("prn") {
        (i, "prn".len())
    } else {
        return false;
    };
    let span = TextSpan::new(base.begin + idx, base.begin + idx + len);
    state.as_needed = Some(Spanned::new(true, span));
    state.span.expand(span);
    state.record(CascadeStep::AsNeededOverlay, vec![OutputField::AsNeeded]);
    true
}

/// Weekday-list overlay over one covering sentence.
///
/// Overwrites any frequency/period from earlier steps: the day count
/// multiplies into the existing frequency (default 1), the period unit is
/// forced to weeks, and the period becomes 1 (or 2 for "every other").
fn apply_weekdays(state: &mut CascadeState, sentence_text: &str, sentence: TextSpan) -> bool {
    let Some(caps) = patterns::PERIOD_WEEKDAYS.captures(sentence_text) else {
        return false;
    };
    let whole = caps
        .get(0)
        .map(|m| TextSpan::new(sentence.begin + m.start(), sentence.begin + m.end()))
        .unwrap_or(sentence);
    state.span.expand(whole);
    let other = caps.name("other").is_some();
    let Some(days_group) = caps.name("days") else {
        return false;
    };
    let days_span = TextSpan::new(
        sentence.begin + days_group.start(),
        sentence.begin + days_group.end(),
    );
    let cleaned = days_group
        .as_str()
        .trim()
        .replace(',', "")
        .replace("and", "")
        .replace("  ", " ");
    let tokens: Vec<&str> = cleaned
        .split([',', ' ', '-'])
        .filter(|t| !t.is_empty())
        .collect();
    let existing = state.repeat.frequency.map(|f| f.value).unwrap_or(1.0);
    let existing_max = state.repeat.frequency_max.map(|f| f.value).unwrap_or(1.0);
    let freq = tokens.len() as f64 * existing;
    let freq_max = freq * existing_max;
    let here = state.span;
    state.repeat.period = Some(Spanned::new(if other { 2.0 } else { 1.0 }, here));
    state.repeat.period_unit = Some(Spanned::new(UnitOfTime::Week, here));
    state.repeat.frequency = Some(Spanned::new(freq, here));
    state.repeat.frequency_max = Some(Spanned::new(freq_max, here));
    state.repeat.day_of_week = tokens
        .iter()
        .filter_map(|t| {
            patterns::WEEKDAY
                .captures(t)
                .and_then(|c| Weekday::from_prefix(&c["day"][..3]))
        })
        .map(|d| Spanned::new(d, days_span))
        .collect();
    state.record(
        CascadeStep::WeekdayOverlay,
        vec![
            OutputField::Period,
            OutputField::PeriodUnit,
            OutputField::Frequency,
            OutputField::FrequencyMax,
            OutputField::DayOfWeek,
        ],
    );
    true
}

/// Meal/sleep/waking event overlay. Sets `when` and clears the
/// frequency/period triad.
fn apply_event_timing(state: &mut CascadeState, covered: &str, base: TextSpan) -> bool {
    let Some(caps) = patterns::TIMING_EVENTS.captures(covered) else {
        return false;
    };
    let offset = match &caps["op"] {
        "before" => EventOffset::Ante,
        "after" => EventOffset::Post,
        _ => EventOffset::None,
    };
    let Some(event) = TimingEvent::from_keyword(&caps["event"]) else {
        return false;
    };
    set_when(state, CascadeStep::EventOverlay, offset, event, base);
    true
}

/// Time-of-day overlay. Same clearing behavior as the event overlay.
fn apply_time_of_day(state: &mut CascadeState, covered: &str, base: TextSpan) -> bool {
    let Some(caps) = patterns::TIME_OF_DAY.captures(covered) else {
        return false;
    };
    let Some(event) = TimingEvent::from_keyword(&caps["time"]) else {
        return false;
    };
    set_when(state, CascadeStep::TimeOfDayOverlay, EventOffset::None, event, base);
    true
}

fn set_when(
    state: &mut CascadeState,
    step: CascadeStep,
    offset: EventOffset,
    event: TimingEvent,
    base: TextSpan,
) {
    state.span.expand(base);
    state
        .repeat
        .set_when(Spanned::new(EventTiming::new(offset, event), state.span));
    state.record(
        step,
        vec![
            OutputField::When,
            OutputField::Frequency,
            OutputField::FrequencyMax,
            OutputField::Period,
            OutputField::PeriodMax,
            OutputField::PeriodUnit,
        ],
    );
}

/// Attaches a GTS timing-abbreviation concept when the schedule matches a
/// standard one. The offset is fixed at one period.
fn derive_abbreviation(state: &mut CascadeState) {
    let (Some(freq), Some(period), Some(unit)) = (
        state.repeat.frequency,
        state.repeat.period,
        state.repeat.period_unit,
    ) else {
        return;
    };
    let hours = period.value * unit.value.hours();
    let Some(abbv) =
        dosage_types::well_known::TimingAbbreviation::from_timing(freq.value, 1.0, hours)
    else {
        return;
    };
    let span = freq.span.union(period.span).union(unit.span);
    state.code = Some(CodedConcept::coded(
        Spanned::new(abbv.code().to_string(), span),
        dosage_types::well_known::GTS_ABBREVIATION,
        Spanned::new(abbv.code().to_string(), span),
    ));
    state.record(CascadeStep::AbbreviationLookup, vec![OutputField::Code]);
}

/// Lowercases, replaces hyphens with spaces, and collapses paired double
/// spaces before overlay matching. Offsets into the result may drift from
/// the source text when spaces collapse.
fn normalize_overlay_text(text: &str) -> String {
    text.to_lowercase().replace('-', " ").replace("  ", " ")
}

fn parse_number(text: &str) -> f64 {
    number::normalize(text).parse().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_sentence(text: &str) -> DocumentContext {
        DocumentContext::new(text, vec![TextSpan::new(0, text.len())], vec![])
    }

    fn run(attr_text: &str) -> TimingExtraction {
        let ctx = single_sentence(attr_text);
        let span = TextSpan::new(0, attr_text.len());
        let attrs = vec![AttributeSpan::new(AttributeTag::Frequency, span, attr_text)];
        TimingExtractor::new(&ctx).extract(span, &attrs)
    }

    #[test]
    fn test_every_n_hours() {
        let out = run("every 6 hours");
        let repeat = &out.timing.repeat;
        assert_eq!(repeat.frequency.unwrap().value, 1.0);
        assert_eq!(repeat.period.unwrap().value, 6.0);
        assert_eq!(repeat.period_unit.unwrap().value, UnitOfTime::Hour);
        // Period span runs from the attribute start to the end of "6"
        assert_eq!(repeat.period.unwrap().span, TextSpan::new(0, 7));
        let code = out.timing.code.as_ref().unwrap();
        assert_eq!(code.text.as_ref().unwrap().value, "Q6H");
        assert_eq!(
            code.codings[0].system,
            dosage_types::well_known::GTS_ABBREVIATION
        );
    }

    #[test]
    fn test_count_range_per_day() {
        let out = run("3-4 times a day");
        let repeat = &out.timing.repeat;
        assert_eq!(repeat.frequency.unwrap().value, 3.0);
        assert_eq!(repeat.frequency_max.unwrap().value, 4.0);
        assert_eq!(repeat.period.unwrap().value, 1.0);
        assert_eq!(repeat.period_unit.unwrap().value, UnitOfTime::Day);
    }

    #[test]
    fn test_every_other_day() {
        let out = run("every other day");
        let repeat = &out.timing.repeat;
        assert_eq!(repeat.frequency.unwrap().value, 1.0);
        assert_eq!(repeat.period.unwrap().value, 2.0);
        assert_eq!(repeat.period_unit.unwrap().value, UnitOfTime::Day);
        // QOD is keyed on a two-period offset; the fixed-offset lookup
        // does not produce it
        assert!(out.timing.code.is_none());
    }

    #[test]
    fn test_period_range() {
        let out = run("every 4-6 hours");
        let repeat = &out.timing.repeat;
        assert_eq!(repeat.period.unwrap().value, 4.0);
        assert_eq!(repeat.period_max.unwrap().value, 6.0);
        assert_eq!(repeat.period_unit.unwrap().value, UnitOfTime::Hour);
    }

    #[test]
    fn test_twice_daily_derives_bid() {
        let out = run("twice daily");
        let repeat = &out.timing.repeat;
        assert_eq!(repeat.frequency.unwrap().value, 2.0);
        assert_eq!(repeat.period.unwrap().value, 1.0);
        assert_eq!(repeat.period_unit.unwrap().value, UnitOfTime::Day);
        assert_eq!(out.timing.code.unwrap().text.unwrap().value, "BID");
    }

    #[test]
    fn test_bare_ly_adverb() {
        let out = run("daily");
        let repeat = &out.timing.repeat;
        assert!(repeat.frequency.is_none());
        assert_eq!(repeat.period.unwrap().value, 1.0);
        assert_eq!(repeat.period_unit.unwrap().value, UnitOfTime::Day);
    }

    #[test]
    fn test_event_overlay_clears_schedule() {
        let out = run("twice daily before meals");
        let repeat = &out.timing.repeat;
        assert_eq!(repeat.when.unwrap().value.code(), "AC");
        assert!(repeat.frequency.is_none());
        assert!(repeat.period.is_none());
        assert!(repeat.period_unit.is_none());
        assert_eq!(
            out.last_writer(OutputField::When),
            Some(CascadeStep::EventOverlay)
        );
    }

    #[test]
    fn test_time_of_day_overlay() {
        let out = run("in the morning");
        let repeat = &out.timing.repeat;
        assert_eq!(repeat.when.unwrap().value.code(), "MORN");
        assert!(repeat.frequency.is_none());
    }

    #[test]
    fn test_weekday_overlay_multiplies_frequency() {
        let text = "take twice on mondays and wednesdays";
        let ctx = single_sentence(text);
        let attrs = vec![AttributeSpan::new(
            AttributeTag::Frequency,
            TextSpan::new(5, 10),
            "twice",
        )];
        let out = TimingExtractor::new(&ctx).extract(TextSpan::new(0, text.len()), &attrs);
        let repeat = &out.timing.repeat;
        assert_eq!(repeat.frequency.unwrap().value, 4.0);
        assert_eq!(repeat.period.unwrap().value, 1.0);
        assert_eq!(repeat.period_unit.unwrap().value, UnitOfTime::Week);
        let days: Vec<&str> = repeat.day_of_week.iter().map(|d| d.value.code()).collect();
        assert_eq!(days, vec!["mon", "wed"]);
        assert_eq!(
            out.last_writer(OutputField::Frequency),
            Some(CascadeStep::WeekdayOverlay)
        );
    }

    #[test]
    fn test_every_other_weekday() {
        let text = "every other saturday";
        let ctx = single_sentence(text);
        let attrs = vec![AttributeSpan::new(
            AttributeTag::Frequency,
            TextSpan::new(0, text.len()),
            text,
        )];
        let out = TimingExtractor::new(&ctx).extract(TextSpan::new(0, text.len()), &attrs);
        let repeat = &out.timing.repeat;
        assert_eq!(repeat.period.unwrap().value, 2.0);
        assert_eq!(repeat.period_unit.unwrap().value, UnitOfTime::Week);
        let days: Vec<&str> = repeat.day_of_week.iter().map(|d| d.value.code()).collect();
        assert_eq!(days, vec!["sat"]);
    }

    #[test]
    fn test_as_needed() {
        let out = run("take 1 tablet prn for pain");
        assert_eq!(out.as_needed.unwrap().value, true);
        assert!(out.text.is_none());
        assert_eq!(
            out.last_writer(OutputField::AsNeeded),
            Some(CascadeStep::AsNeededOverlay)
        );
    }

    #[test]
    fn test_text_fallback_when_nothing_fires() {
        let out = run("per sliding scale");
        assert_eq!(out.text.unwrap().value, "per sliding scale");
        assert!(out.timing.repeat.period.is_none());
        assert!(out.span.is_unset());
    }

    #[test]
    fn test_schedule_timex_fallback_without_frequency_attribute() {
        let text = "continue aspirin per medication list";
        let ctx = DocumentContext::new(
            text,
            vec![TextSpan::new(0, text.len())],
            vec![TimestampAnnotation::new(
                TimexType::Set,
                TextSpan::new(17, 20),
                "R1P24H",
            )],
        );
        let out = TimingExtractor::new(&ctx).extract(TextSpan::new(9, 16), &[]);
        let repeat = &out.timing.repeat;
        // 24 hours folds into one day
        assert_eq!(repeat.period.unwrap().value, 1.0);
        assert_eq!(repeat.period_unit.unwrap().value, UnitOfTime::Day);
        assert_eq!(out.span, TextSpan::new(17, 20));
        assert_eq!(
            out.last_writer(OutputField::Period),
            Some(CascadeStep::ScheduleTimexFallback)
        );
    }

    #[test]
    fn test_schedule_timex_non_round_hours_keeps_unit() {
        let text = "aspirin q8";
        let ctx = DocumentContext::new(
            text,
            vec![TextSpan::new(0, text.len())],
            vec![TimestampAnnotation::new(
                TimexType::Set,
                TextSpan::new(8, 10),
                "RP8H",
            )],
        );
        let out = TimingExtractor::new(&ctx).extract(TextSpan::new(0, 7), &[]);
        let repeat = &out.timing.repeat;
        assert_eq!(repeat.period.unwrap().value, 8.0);
        assert_eq!(repeat.period_unit.unwrap().value, UnitOfTime::Hour);
    }

    #[test]
    fn test_duration_with_frequency_becomes_bounds() {
        let text = "twice daily for 3 days";
        let ctx = single_sentence(text);
        let attrs = vec![
            AttributeSpan::new(AttributeTag::Frequency, TextSpan::new(0, 11), "twice daily"),
            AttributeSpan::new(AttributeTag::Duration, TextSpan::new(16, 22), "3 days"),
        ];
        let out = TimingExtractor::new(&ctx).extract(TextSpan::new(0, text.len()), &attrs);
        let repeat = &out.timing.repeat;
        let bounds = repeat.bounds_duration.as_ref().unwrap();
        assert_eq!(bounds.value.value, 3.0);
        assert_eq!(bounds.unit.value, UnitOfTime::Day);
        assert!(repeat.duration.is_none());
        assert_eq!(out.span, TextSpan::new(0, 22));
    }

    #[test]
    fn test_duration_alone_stays_simple() {
        let text = "for 2 weeks";
        let ctx = single_sentence(text);
        let attrs = vec![AttributeSpan::new(
            AttributeTag::Duration,
            TextSpan::new(4, 11),
            "2 weeks",
        )];
        let out = TimingExtractor::new(&ctx).extract(TextSpan::new(0, text.len()), &attrs);
        let repeat = &out.timing.repeat;
        assert_eq!(repeat.duration.unwrap().value, 2.0);
        assert_eq!(repeat.duration_unit.unwrap().value, UnitOfTime::Week);
        assert!(repeat.bounds_duration.is_none());
    }

    #[test]
    fn test_duration_timex_fallback() {
        let text = "aspirin over the holiday";
        let ctx = DocumentContext::new(
            text,
            vec![TextSpan::new(0, text.len())],
            vec![TimestampAnnotation::new(
                TimexType::Duration,
                TextSpan::new(8, 24),
                "P3D",
            )],
        );
        let out = TimingExtractor::new(&ctx).extract(TextSpan::new(0, 7), &[]);
        let repeat = &out.timing.repeat;
        assert_eq!(repeat.duration.unwrap().value, 3.0);
        assert_eq!(repeat.duration_unit.unwrap().value, UnitOfTime::Day);
        assert_eq!(
            out.last_writer(OutputField::Duration),
            Some(CascadeStep::DurationTimexFallback)
        );
    }

    #[test]
    fn test_non_ascii_duration_unit() {
        let text = "tomar por 3 días";
        let ctx = single_sentence(text);
        // "í" is two bytes; the attribute span is byte-addressed
        let attrs = vec![AttributeSpan::new(
            AttributeTag::Duration,
            TextSpan::new(10, 17),
            "3 días",
        )];
        let out = TimingExtractor::new(&ctx).extract(TextSpan::new(0, 5), &attrs);
        let repeat = &out.timing.repeat;
        // The unit is unrecognized; the value survives without one
        assert_eq!(repeat.duration.unwrap().value, 3.0);
        assert!(repeat.duration_unit.is_none());
    }

    #[test]
    fn test_unstructured_duration_appends_text() {
        let text = "overnight";
        let ctx = single_sentence(text);
        let attrs = vec![AttributeSpan::new(
            AttributeTag::Duration,
            TextSpan::new(0, 9),
            "overnight",
        )];
        let out = TimingExtractor::new(&ctx).extract(TextSpan::new(0, 9), &attrs);
        assert_eq!(out.text.unwrap().value, "overnight");
        assert!(out.timing.repeat.duration.is_none());
    }
}
