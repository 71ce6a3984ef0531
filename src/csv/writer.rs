use crate::util::error::CpResult;

/// Serializes `columns` as the header and `rows` (each already ordered to
/// match `columns`) as the body, RFC-4180-escaped, `\r\n` terminated.
pub fn write_csv(columns: &[String], rows: &[Vec<String>]) -> CpResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(columns)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(writer.into_inner().expect("in-memory CSV writer never fails to unwrap"))
}
