use std::time::Duration;

use structopt::StructOpt;

use crate::parser::parse_duration;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "promprobe",
    about = "Query a Prometheus metrics endpoint by selector"
)]
pub struct CliOpt {
    /// Metrics endpoint, e.g. http://127.0.0.1:9187/metrics
    pub url: String,

    /// Selectors like `cpu` or `cpu{env="prod",region=us}`
    #[structopt(required = true)]
    pub selectors: Vec<String>,

    /// Assert the first match of the first selector has this value
    #[structopt(long = "expect", short = "e")]
    pub expect: Option<String>,

    #[structopt(long = "attempts", short = "a", default_value = "40")]
    pub attempts: u32,

    #[structopt(long = "delay", short = "d", default_value = "250ms", parse(try_from_str = parse_duration))]
    pub delay: Duration,

    #[structopt(long = "timeout", short = "t", default_value = "5s", parse(try_from_str = parse_duration))]
    pub timeout: Duration,

    #[structopt(long = "json", short = "j")]
    pub json: bool,

    #[structopt(long = "verbose", short = "v")]
    pub verbose: bool,
}
