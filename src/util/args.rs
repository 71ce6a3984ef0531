use argh::FromArgs;

/// CLI flags for the batch extraction driver.
#[derive(FromArgs)]
#[argh(description = "extract a canonical CSV for one data system from its catalog and uploaded sources")]
pub struct RunExtractionArgs {
    #[argh(option, short = 'c', description = "directory of catalog YAML files")]
    pub catalog_dir: String,

    #[argh(option, short = 'u', description = "directory of uploaded CSVs, named per data source file_name")]
    pub uploads_dir: String,

    #[argh(option, short = 's', description = "id or unique name of the data system to extract")]
    pub data_system: String,

    #[argh(option, short = 'o', description = "directory to write extracted_data_<date>.csv into")]
    pub output_dir: String,
}
