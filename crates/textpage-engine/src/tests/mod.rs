//! Shared helpers for unit tests.

use chrono::{DateTime, Local, TimeZone, Utc};

/// A fixed local wall-clock time so title fallbacks are reproducible.
pub fn fixed_now() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
}

/// The same instant as a UTC timestamp, for history records.
pub fn fixed_utc() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
}

/// A note that touches every block kind.
pub const SAMPLE_NOTE: &str = "\
# Release notes

Version two is **faster** and uses `less memory`.

- parser rewrite
- new [docs](https://example.com/docs)

1. install
2. run

> Ship it

```sh
cargo install textpage
```
";
