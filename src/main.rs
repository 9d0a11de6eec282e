use std::io::{self, Write};

use log::debug;
use structopt::StructOpt;

use promprobe::cliopt::CliOpt;
use promprobe::format::{Formatter, HumanReadableFormatter, JSONFormatter, Value};
use promprobe::input::{HttpFetcher, PrometheusDecoder, Retriever, RetryPolicy, ThreadSleeper};
use promprobe::parse_selector;
use promprobe::Probe;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let opt = CliOpt::from_args();
    debug!("{:?}", opt);

    let probe = Probe::with_retriever(Retriever::with_parts(
        opt.url.as_str(),
        Box::new(HttpFetcher::new(opt.timeout)),
        Box::new(PrometheusDecoder::new()),
        Box::new(ThreadSleeper),
        RetryPolicy::new(opt.attempts, opt.delay),
    ));

    let formatter: Box<dyn Formatter> = if opt.json {
        Box::new(JSONFormatter::new())
    } else {
        Box::new(HumanReadableFormatter::new())
    };

    let snapshot = probe.refresh()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if opt.verbose {
        out.write_all(&formatter.format(&Value::Snapshot(&snapshot))?)?;
        out.write_all(b"\n")?;
    }

    if let Some(expected) = &opt.expect {
        // structopt guarantees at least one selector.
        let selector = &opt.selectors[0];
        probe.expect_value(selector, expected.as_str())?;
        writeln!(out, "ok {} == {}", selector, expected)?;
        return Ok(());
    }

    for selector in &opt.selectors {
        let name = parse_selector(selector)?.into_parts().0;
        for sample in probe.query(selector)? {
            out.write_all(&formatter.format(&Value::Sample(&name, &sample))?)?;
            out.write_all(b"\n")?;
        }
    }

    Ok(())
}
