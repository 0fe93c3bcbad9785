use std::io;

/// Writes everything to both `a` and `b`.
pub(crate) struct TeeWriter<'a, A, B> {
    a: &'a mut A,
    b: &'a mut B,
}

impl<'a, A, B> TeeWriter<'a, A, B> {
    pub(crate) fn new(a: &'a mut A, b: &'a mut B) -> Self {
        TeeWriter { a, b }
    }
}

impl<A: io::Write, B: io::Write> io::Write for TeeWriter<'_, A, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.a.write_all(buf)?;
        self.b.write_all(buf)?;

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.a.flush()?;
        self.b.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_tee_writer() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        {
            let mut tee = TeeWriter::new(&mut a, &mut b);
            tee.write_all(b"hello").unwrap();
            tee.write_all(b" world").unwrap();
        }
        assert_eq!(&a, b"hello world");
        assert_eq!(a, b);
    }
}
