//! A tool to validate and summarize cognitive-load metrics.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use cogload_lib::{Host, run};
use std::io::Write;
use std::io::{stderr, stdout};
use tokio::io::{AsyncRead, stdin};

/// Default host that reads and writes the real standard streams.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for RealHost {
    fn input(&mut self) -> impl AsyncRead + Unpin + Send {
        stdin()
    }

    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[tokio::main]
#[cfg_attr(coverage_nightly, coverage(off))]
async fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args()).await
}
