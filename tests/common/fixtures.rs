//! Sample `hey` reports.

/// A complete report with every section, blank-line terminated.
pub const FULL_REPORT: &str = "\
200 / 200 [=====================================] 100.00 % 0s
All requests done.

Summary:
  Total:\t0.5279 secs
  Slowest:\t0.4137 secs
  Fastest:\t0.0225 secs
  Average:\t0.1235 secs
  Requests/sec:\t378.8461
  Total data:\t2194000 bytes
  Size/request:\t10970 bytes

Status code distribution:
  [200]\t198 responses
  [502]\t2 responses

Response time histogram:
  0.022 [1]\t|
  0.062 [91]\t|\u{220e}\u{220e}\u{220e}\u{220e}\u{220e}\u{220e}\u{220e}\u{220e}
  0.101 [40]\t|\u{220e}\u{220e}\u{220e}\u{220e}
  0.140 [30]\t|\u{220e}\u{220e}\u{220e}
  0.414 [38]\t|\u{220e}\u{220e}\u{220e}

Latency distribution:
  10% in 0.0365 secs
  25% in 0.0467 secs
  50% in 0.0727 secs
  75% in 0.1601 secs
  90% in 0.3349 secs
  95% in 0.3893 secs
  99% in 0.4091 secs

";

/// Report whose latency section ends at an explicit error distribution.
pub const REPORT_WITH_ERRORS: &str = "\
All requests done.

Summary:
  Total:\t1.0021 secs
  Slowest:\t0.9000 secs
  Fastest:\t0.0100 secs
  Average:\t0.2000 secs
  Requests/sec:\t45.9000
  Total data:\t4600 bytes
  Size/request:\t100 bytes

Status code distribution:
  [200]\t46 responses

Response time histogram:
  0.010 [10]\t|\u{25a0}\u{25a0}
  0.455 [30]\t|\u{25a0}\u{25a0}\u{25a0}\u{25a0}\u{25a0}\u{25a0}
  0.900 [6]\t|\u{25a0}

Latency distribution:
  10% in 0.0120 secs
  50% in 0.1800 secs
  99% in 0.8800 secs
Error distribution:
  [3]\tGet http://wordpress:80/?p=20: dial tcp 10.0.0.5:80: connection refused
  [1]\tGet http://wordpress:80/?p=20: net/http: request canceled
";

/// Strip the named sentinel line from a fixture.
pub fn without_line(report: &str, sentinel: &str) -> String {
    report
        .lines()
        .filter(|l| l.trim() != sentinel)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build a minimal well-formed report from latency lines.
pub fn report_with_latency(latency_lines: &[&str]) -> String {
    let mut out = String::from(
        "All requests done.\n\nSummary:\n  Total:\t0.1000 secs\n\nStatus code distribution:\n  [200]\t10 responses\n\nResponse time histogram:\n  0.010 [10]\t|\u{25a0}\n\nLatency distribution:\n",
    );
    for line in latency_lines {
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }
    out
}
