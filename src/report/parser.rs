use tracing::{debug, instrument, trace};

use crate::error::{BenchError, Result};
use crate::metrics;
use crate::types::{BenchmarkReport, Section};

use super::line::{
    parse_error_line, parse_histogram_line, parse_latency_line, parse_status_line,
    parse_summary_line,
};
use super::{
    is_sentinel, which_sentinel, ALL_REQUESTS_DONE, ERROR_DISTRIBUTION, LATENCY_DISTRIBUTION,
    RESPONSE_TIME_HISTOGRAM, STATUS_CODE_DISTRIBUTION,
};

/// Parser position within the report text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Summary,
    StatusDistribution,
    Histogram,
    LatencyDistribution,
    ErrorDistribution,
    Done,
}

/// Line-oriented state machine over one or more concatenated reports.
///
/// Yields one `BenchmarkReport` per `All requests done.` block. The first
/// error ends iteration; no partial report is ever produced.
pub struct ReportParser<'a> {
    lines: Vec<&'a str>,
    pos: usize,
    found_any: bool,
    finished: bool,
}

impl<'a> ReportParser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines().collect(),
            pos: 0,
            found_any: false,
            finished: false,
        }
    }

    /// 1-based number of the line that will be read next.
    fn line_no(&self) -> usize {
        self.pos + 1
    }

    fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<&'a str> {
        let line = self.peek()?;
        self.pos += 1;
        Some(line)
    }

    fn skip_blank(&mut self) {
        while self.peek().is_some_and(|l| l.trim().is_empty()) {
            self.pos += 1;
        }
    }

    /// Consume lines up to and including the next `All requests done.`.
    fn seek_start(&mut self) -> bool {
        while let Some(line) = self.advance() {
            if is_sentinel(line, ALL_REQUESTS_DONE) {
                return true;
            }
        }
        false
    }

    fn malformed(&self, expected: &'static str) -> BenchError {
        BenchError::MalformedReport {
            expected,
            line: self.line_no(),
        }
    }

    fn invalid(&self, section: Section, content: &str) -> BenchError {
        BenchError::InvalidLine {
            section,
            // the offending line has already been consumed
            line: self.pos,
            content: content.to_string(),
        }
    }

    /// Check that the required sentinels of the report starting at the current
    /// position are all present and in order, before any line is parsed.
    fn check_structure(&self) -> Result<()> {
        let mut required = [
            STATUS_CODE_DISTRIBUTION,
            RESPONSE_TIME_HISTOGRAM,
            LATENCY_DISTRIBUTION,
        ]
        .into_iter()
        .peekable();
        let mut end = self.lines.len();

        for (idx, line) in self.lines.iter().enumerate().skip(self.pos) {
            let Some(sentinel) = which_sentinel(line) else {
                continue;
            };
            if sentinel == ALL_REQUESTS_DONE || sentinel == ERROR_DISTRIBUTION {
                end = idx;
                break;
            }
            match required.peek() {
                Some(&next) if next == sentinel => {
                    required.next();
                }
                Some(&next) => {
                    return Err(BenchError::MalformedReport {
                        expected: next,
                        line: idx + 1,
                    })
                }
                None => break,
            }
        }

        match required.next() {
            Some(missing) => Err(BenchError::MalformedReport {
                expected: missing,
                line: end + 1,
            }),
            None => Ok(()),
        }
    }

    /// Read data lines of `section` until `terminator` is consumed.
    ///
    /// Blank lines are skipped. Any other sentinel, or end of input, means the
    /// terminator is missing or out of order.
    fn read_until(
        &mut self,
        section: Section,
        terminator: &'static str,
        mut on_line: impl FnMut(&str) -> Option<()>,
    ) -> Result<()> {
        loop {
            let Some(line) = self.peek() else {
                return Err(self.malformed(terminator));
            };
            if is_sentinel(line, terminator) {
                self.pos += 1;
                return Ok(());
            }
            if which_sentinel(line).is_some() {
                return Err(self.malformed(terminator));
            }
            self.pos += 1;
            if line.trim().is_empty() {
                continue;
            }
            if on_line(line).is_none() {
                return Err(self.invalid(section, line));
            }
            metrics::SECTION_LINES_TOTAL
                .with_label_values(&[section.as_str()])
                .inc();
        }
    }

    /// Parse one report; the `All requests done.` line has already been consumed.
    fn parse_one(&mut self) -> Result<BenchmarkReport> {
        self.check_structure()?;

        let mut report = BenchmarkReport::default();
        let mut state = State::Summary;

        // table header ("Summary:")
        self.skip_blank();
        if self.advance().is_none() {
            return Err(self.malformed(STATUS_CODE_DISTRIBUTION));
        }

        while state != State::Done {
            trace!(?state, line = self.line_no(), "parser state");
            state = match state {
                State::Summary => {
                    self.read_until(Section::Summary, STATUS_CODE_DISTRIBUTION, |l| {
                        report.summary.push(parse_summary_line(l)?);
                        Some(())
                    })?;
                    State::StatusDistribution
                }
                State::StatusDistribution => {
                    self.read_until(
                        Section::StatusDistribution,
                        RESPONSE_TIME_HISTOGRAM,
                        |l| {
                            let (code, count) = parse_status_line(l)?;
                            *report.status_or_error_distribution.entry(code).or_default() +=
                                count;
                            Some(())
                        },
                    )?;
                    State::Histogram
                }
                State::Histogram => {
                    self.read_until(Section::Histogram, LATENCY_DISTRIBUTION, |l| {
                        report.histogram.push(parse_histogram_line(l)?);
                        Some(())
                    })?;
                    State::LatencyDistribution
                }
                State::LatencyDistribution => self.read_latency(&mut report)?,
                State::ErrorDistribution => {
                    self.read_errors(&mut report)?;
                    State::Done
                }
                State::Done => State::Done,
            };
        }

        Ok(report)
    }

    /// Latency lines run until a blank line, `Error distribution:`, the next
    /// report, or end of input.
    fn read_latency(&mut self, report: &mut BenchmarkReport) -> Result<State> {
        loop {
            let Some(line) = self.peek() else {
                return Ok(State::Done);
            };
            if line.trim().is_empty() {
                self.skip_blank();
                return Ok(self.error_section_follows());
            }
            match which_sentinel(line) {
                Some(ERROR_DISTRIBUTION) => {
                    self.pos += 1;
                    return Ok(State::ErrorDistribution);
                }
                Some(ALL_REQUESTS_DONE) => return Ok(State::Done),
                Some(_) => return Err(self.malformed(ERROR_DISTRIBUTION)),
                None => {}
            }

            self.pos += 1;
            let entry = parse_latency_line(line)
                .ok_or_else(|| self.invalid(Section::LatencyDistribution, line))?;
            if report
                .latency_distribution
                .last()
                .is_some_and(|prev| prev.percentile > entry.percentile)
            {
                return Err(self.invalid(Section::LatencyDistribution, line));
            }
            report.latency_distribution.push(entry);
            metrics::SECTION_LINES_TOTAL
                .with_label_values(&[Section::LatencyDistribution.as_str()])
                .inc();
        }
    }

    fn error_section_follows(&mut self) -> State {
        match self.peek() {
            Some(line) if is_sentinel(line, ERROR_DISTRIBUTION) => {
                self.pos += 1;
                State::ErrorDistribution
            }
            _ => State::Done,
        }
    }

    fn read_errors(&mut self, report: &mut BenchmarkReport) -> Result<()> {
        while let Some(line) = self.peek() {
            if line.trim().is_empty() || is_sentinel(line, ALL_REQUESTS_DONE) {
                break;
            }
            self.pos += 1;
            let (message, count) = parse_error_line(line)
                .ok_or_else(|| self.invalid(Section::ErrorDistribution, line))?;
            *report
                .status_or_error_distribution
                .entry(message)
                .or_default() += count;
            metrics::SECTION_LINES_TOTAL
                .with_label_values(&[Section::ErrorDistribution.as_str()])
                .inc();
        }
        Ok(())
    }
}

impl Iterator for ReportParser<'_> {
    type Item = Result<BenchmarkReport>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if !self.seek_start() {
            self.finished = true;
            if self.found_any {
                return None;
            }
            metrics::PARSE_ERRORS_TOTAL
                .with_label_values(&[BenchError::EmptyInput.kind()])
                .inc();
            return Some(Err(BenchError::EmptyInput));
        }
        self.found_any = true;
        debug!(line = self.pos, "report start");

        match self.parse_one() {
            Ok(report) => {
                metrics::REPORTS_PARSED_TOTAL.inc();
                debug!(
                    summary = report.summary.len(),
                    buckets = report.histogram.len(),
                    percentiles = report.latency_distribution.len(),
                    "report parsed"
                );
                Some(Ok(report))
            }
            Err(e) => {
                self.finished = true;
                metrics::PARSE_ERRORS_TOTAL
                    .with_label_values(&[e.kind()])
                    .inc();
                Some(Err(e))
            }
        }
    }
}

/// Parse every report contained in `input`.
#[instrument(skip(input), fields(bytes = input.len()))]
pub fn parse_reports(input: &str) -> Result<Vec<BenchmarkReport>> {
    ReportParser::new(input).collect()
}

/// Parse the first report contained in `input`.
pub fn parse_report(input: &str) -> Result<BenchmarkReport> {
    ReportParser::new(input)
        .next()
        .unwrap_or(Err(BenchError::EmptyInput))
}
