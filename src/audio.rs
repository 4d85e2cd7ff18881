//! Audio payload — the input handed to the pipeline by the caller.
//!
//! The pipeline never records audio itself; the caller captures or loads a
//! voice message and wraps the raw bytes in an [`AudioPayload`] together with
//! a filename hint.  The hint's extension tells the provider what container
//! format to expect (`voice_message.wav`, `note.mp3`, …) — it is advisory
//! metadata, not validated against the actual bytes.

// ---------------------------------------------------------------------------
// AudioPayload
// ---------------------------------------------------------------------------

/// Raw audio bytes plus a filename hint carrying a format extension.
///
/// Immutable once constructed; the transcription stage borrows it for the
/// duration of one upload.
///
/// # Example
///
/// ```rust
/// use voice_to_image::audio::AudioPayload;
///
/// let payload = AudioPayload::new(vec![0_u8; 64], "note.mp3");
/// assert_eq!(payload.filename(), "note.mp3");
/// assert_eq!(payload.mime_type(), "audio/mpeg");
/// ```
#[derive(Debug, Clone)]
pub struct AudioPayload {
    bytes: Vec<u8>,
    filename: String,
}

/// Filename used when the caller supplies an empty hint, mirroring the
/// provider's expectation of a name with an audio extension.
const DEFAULT_FILENAME: &str = "voice_message.wav";

impl AudioPayload {
    /// Wrap `bytes` with the given filename hint.
    ///
    /// An empty hint is replaced with `voice_message.wav` so the upload
    /// always carries a recognizable extension.
    pub fn new(bytes: Vec<u8>, filename: impl Into<String>) -> Self {
        let filename = filename.into();
        let filename = if filename.trim().is_empty() {
            DEFAULT_FILENAME.to_string()
        } else {
            filename
        };
        Self { bytes, filename }
    }

    /// The raw audio bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The filename hint, never empty.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// `true` when the payload contains no audio data at all.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// MIME type derived from the filename extension.
    ///
    /// Recognizes the common voice-recorder container formats
    /// (`wav`, `mp3`, `m4a`, `ogg`, `webm`); anything else falls back to
    /// `application/octet-stream`, which providers accept as "sniff it".
    pub fn mime_type(&self) -> &'static str {
        let ext = self
            .filename
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or("");

        match ext.to_ascii_lowercase().as_str() {
            "wav" => "audio/wav",
            "mp3" => "audio/mpeg",
            "m4a" => "audio/mp4",
            "ogg" => "audio/ogg",
            "webm" => "audio/webm",
            _ => "application/octet-stream",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
