use clap::Subcommand;
use filter_compiler::settings::parse_max_depth;

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a payload and print the users it accepts
    Filter {
        #[arg(long, help = "Search payload (JSON) file path")]
        payload: String,

        #[arg(long, help = "JSON array of users to filter")]
        users: String,

        #[arg(long, value_parser = parse_depth, help = "Deepest group nesting to compile")]
        max_depth: Option<usize>,

        #[arg(long, help = "Load KEY=VALUE settings from this file")]
        env_file: Option<String>,

        #[arg(
            long,
            help = "If set, prints the matching users as JSON instead of a table"
        )]
        json: bool,

        #[arg(
            long,
            help = "If specified, writes the output to this file instead of stdout"
        )]
        output: Option<String>,
    },
    /// Show the compiled predicate and every dropped condition
    Explain {
        #[arg(long, help = "Search payload (JSON) file path")]
        payload: String,

        #[arg(long, value_parser = parse_depth, help = "Deepest group nesting to compile")]
        max_depth: Option<usize>,

        #[arg(long, help = "Load KEY=VALUE settings from this file")]
        env_file: Option<String>,

        #[arg(long, help = "If set, prints the explanation as JSON")]
        json: bool,
    },
    /// List the filterable user fields
    Fields {
        #[arg(long, help = "If set, prints the field list as JSON")]
        json: bool,
    },
}

fn parse_depth(raw: &str) -> Result<usize, String> {
    parse_max_depth("--max-depth", raw).map_err(|err| err.to_string())
}
