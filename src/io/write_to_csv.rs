use std::io;

use csv::Writer;
use serde::Serialize;

use crate::demos::SampledSeries;
use crate::error::HhoResult;

#[derive(Serialize)]
struct PointData<'a, T> {
    series: &'a str,
    x: T,
    y: T,
}

/// Writes every sample as a `series,x,y` row, series after series.
pub fn write_series<W: io::Write, T: Serialize + Copy>(
    writer: &mut Writer<W>,
    series: &[SampledSeries<T>],
) -> HhoResult<()> {
    for s in series {
        for (&x, &y) in s.x.iter().zip(s.y.iter()) {
            writer.serialize(PointData {
                series: &s.title,
                x,
                y,
            })?;
        }
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_series_to_csv<T: Serialize + Copy>(
    series: &[SampledSeries<T>],
    filename: &str,
) -> HhoResult<()> {
    let mut writer = Writer::from_path(filename)?;
    write_series(&mut writer, series)
}
