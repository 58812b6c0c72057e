use std::io::Write;
use tokio::io::AsyncRead;

/// Abstract the host environment to enable testing
pub trait Host: Send + Sync {
    /// Where `-` input is read from (e.g., stdin)
    fn input(&mut self) -> impl AsyncRead + Unpin + Send;

    // where to send normal output (e.g., stdout)
    fn output(&mut self) -> impl Write;

    // where to send error output (e.g., stderr)
    fn error(&mut self) -> impl Write;

    /// Terminate the process (although in a test environment this might just set a flag and return).
    fn exit(&mut self, code: i32);
}

/// Test host that serves stdin from memory and captures output to in-memory buffers
#[cfg(test)]
pub struct TestHost {
    pub input_buf: Vec<u8>,
    pub output_buf: Vec<u8>,
    pub error_buf: Vec<u8>,
    pub exit_code: Option<i32>,
}

#[cfg(test)]
impl TestHost {
    pub const fn new() -> Self {
        Self::with_input(Vec::new())
    }

    pub const fn with_input(input_buf: Vec<u8>) -> Self {
        Self {
            input_buf,
            output_buf: Vec::new(),
            error_buf: Vec::new(),
            exit_code: None,
        }
    }

    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }
}

#[cfg(test)]
impl Host for TestHost {
    fn input(&mut self) -> impl AsyncRead + Unpin + Send {
        self.input_buf.as_slice()
    }

    fn output(&mut self) -> impl Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}
