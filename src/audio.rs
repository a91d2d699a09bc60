//! Cry playback through the default output device.

use std::io::Cursor;

use rodio::{decoder::DecoderError, Decoder, OutputStream, PlayError, Sink, StreamError};

#[derive(thiserror::Error, Debug)]
pub enum AudioError {
    #[error("cry audio is empty")]
    Empty,
    #[error("no audio output: {0}")]
    Output(#[source] StreamError),
    #[error("cannot open audio sink: {0}")]
    Sink(#[source] PlayError),
    #[error("cannot decode cry: {0}")]
    Decode(#[source] DecoderError),
}

/// Decode and play an OGG cry, blocking until playback ends.
pub fn play_cry(bytes: Vec<u8>) -> Result<(), AudioError> {
    if bytes.is_empty() {
        return Err(AudioError::Empty);
    }
    // Decode before touching the device so bad data fails fast
    let source = Decoder::new(Cursor::new(bytes)).map_err(AudioError::Decode)?;
    let (_stream, handle) = OutputStream::try_default().map_err(AudioError::Output)?;
    let sink = Sink::try_new(&handle).map_err(AudioError::Sink)?;
    sink.append(source);
    sink.sleep_until_end();
    Ok(())
}
