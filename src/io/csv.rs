/*!
# Saving Sample Sequences to CSV

Enable via the `csv` feature.
*/

use std::error::Error;
use std::fs::File;
use std::path::Path;

use csv::Writer;

/**
Saves a sample sequence as a CSV file.

The file has a header row `sample,x` followed by one row per sample holding the sample
index and its value.

# Examples

```rust
use mini_mh::io::csv::save_csv;

let dir = tempfile::tempdir()?;
let samples = vec![0.25, 0.5, 0.5];
save_csv(&samples, dir.path().join("samples.csv"))?;
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/
pub fn save_csv<T: std::fmt::Display, P: AsRef<Path>>(
    samples: &[T],
    path: P,
) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_writer(File::create(path)?);
    wtr.write_record(["sample", "x"])?;
    for (i, x) in samples.iter().enumerate() {
        wtr.write_record([i.to_string(), x.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}
