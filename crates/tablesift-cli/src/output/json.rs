use tablesift_core::error::TableError;
use tablesift_core::model::ExtractionResult;

pub fn print(result: &ExtractionResult) -> Result<(), TableError> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}
