/// Read cursor over the raw transcript.
///
/// Reads are split into [`peek`](Self::peek) and [`advance`](Self::advance)
/// so that a fill can validate everything before it moves the cursor.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TranscriptReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> TranscriptReader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// Current offset within the transcript.
    pub(crate) fn position(&self) -> usize {
        self.offset
    }

    /// Number of bytes not read yet.
    pub(crate) fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset)
    }

    /// Next `len` bytes, without moving the cursor.
    pub(crate) fn peek(&self, len: usize) -> Option<&'a [u8]> {
        let end = self.offset.checked_add(len)?;
        self.bytes.get(self.offset..end)
    }

    /// Moves the cursor past bytes returned by [`peek`](Self::peek).
    pub(crate) fn advance(&mut self, len: usize) {
        debug_assert!(len <= self.remaining());
        self.offset += len;
    }
}

impl<'a> From<&'a [u8]> for TranscriptReader<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        TranscriptReader::new(bytes)
    }
}
