use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{Duration, Utc};

/// Writes `len` bytes to `dir/name` and backdates it by `age_days`.
pub fn write_log(dir: &Path, name: &str, len: usize, age_days: i64) {
    let mut file = File::create(dir.join(name)).unwrap();
    file.write_all(&vec![b'#'; len]).unwrap();
    let modified = Utc::now() - Duration::days(age_days);
    file.set_modified(modified.into()).unwrap();
}
