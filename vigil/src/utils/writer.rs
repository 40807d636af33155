use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Stderr, Stdout, Write};
use std::string::FromUtf8Error;

use crate::checks::Result;

/// Output and error streams for a command. Tests swap both for in-memory buffers.
pub struct Writer {
    buffer: WriteBuffer,
    err: WriteBuffer,
}

impl Default for Writer {
    fn default() -> Self {
        Self {
            buffer: WriteBuffer::Vec(vec![]),
            err: WriteBuffer::Vec(vec![]),
        }
    }
}

impl Writer {
    pub fn new(buffer: WriteBuffer, err: WriteBuffer) -> Self {
        Self { buffer, err }
    }

    pub fn write_err(&mut self, message: String) -> std::io::Result<()> {
        writeln!(self.err, "{}", message)
    }

    pub fn into_string(self) -> std::result::Result<String, FromUtf8Error> {
        self.buffer.into_string()
    }

    pub fn err_to_stripped(self) -> Result<String> {
        self.err.stripped()
    }

    /// Output without the color escapes.
    pub fn stripped(self) -> Result<String> {
        self.buffer.stripped()
    }
}

impl Write for Writer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.buffer.flush()
    }
}

pub enum WriteBuffer {
    Stdout(Stdout),
    Stderr(Stderr),
    Vec(Vec<u8>),
    File(File),
}

impl WriteBuffer {
    fn contents(self) -> std::io::Result<Vec<u8>> {
        match self {
            WriteBuffer::Stdout(..) | WriteBuffer::Stderr(..) => Err(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "standard streams cannot be read back",
            )),
            WriteBuffer::Vec(vec) => Ok(vec),
            WriteBuffer::File(mut file) => {
                let mut data = Vec::new();
                file.seek(SeekFrom::Start(0))?;
                file.read_to_end(&mut data)?;
                Ok(data)
            }
        }
    }

    fn into_string(self) -> std::result::Result<String, FromUtf8Error> {
        let bytes = self.contents().unwrap_or_default();
        String::from_utf8(bytes)
    }

    fn stripped(self) -> Result<String> {
        let stripped = strip_ansi_escapes::strip(self.contents()?)?;
        Ok(String::from_utf8_lossy(&stripped).into_owned())
    }
}

impl Write for WriteBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            WriteBuffer::Stdout(stdout) => stdout.write(buf),
            WriteBuffer::Stderr(stderr) => stderr.write(buf),
            WriteBuffer::Vec(vec) => vec.write(buf),
            WriteBuffer::File(file) => file.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            WriteBuffer::Stdout(stdout) => stdout.flush(),
            WriteBuffer::Stderr(stderr) => stderr.flush(),
            WriteBuffer::Vec(vec) => vec.flush(),
            WriteBuffer::File(file) => file.flush(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colored::Colorize;
    use pretty_assertions::assert_eq;

    #[test]
    fn stripped_removes_color() -> Result<()> {
        colored::control::set_override(true);
        let mut writer = Writer::default();
        write!(writer, "{} api", "PASS".green())?;
        assert_eq!(writer.stripped()?, "PASS api");
        Ok(())
    }

    #[test]
    fn errors_go_to_their_own_stream() -> Result<()> {
        let mut writer = Writer::default();
        writer.write_err("boom".to_string())?;
        write!(writer, "out")?;
        assert_eq!(writer.err_to_stripped()?, "boom\n");
        Ok(())
    }
}
