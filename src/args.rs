use clap::Parser;

/// This program normalizes raw field-survey exports into flat validation records.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The JSON export payload to normalize. Accepts the export API's paginated
    /// envelope, a bare array of submissions, or a single submission object.
    #[clap(short, long, value_parser)]
    pub input: String,

    /// The survey campaign the payload belongs to: GTM, HND or TUN.
    #[clap(short, long, value_parser)]
    pub country: String,

    /// (file path, 'stdout' or empty) If specified, the normalized records will be written to the
    /// given location instead of the standard output.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (default json) The output format: json or csv.
    #[clap(long, value_parser)]
    pub format: Option<String>,

    /// (file path) A reference file containing previously normalized records in JSON format. If
    /// provided, survnorm will check that the freshly normalized output matches the reference,
    /// ignoring workflow timestamps.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
