use super::{AudioError, ReferenceAudio, Waveform};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::io::Cursor;

/// Decode a base64 reference clip and check that it is a non-empty WAV stream.
///
/// Line breaks and other ASCII whitespace are ignored, so clips wrapped at
/// 76 columns by MIME encoders or the `base64` tool are accepted.
pub fn decode_reference_audio(
    encoded: &str,
    max_bytes: usize,
) -> Result<ReferenceAudio, AudioError> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let wav_bytes = STANDARD
        .decode(compact)
        .map_err(|e| AudioError::InvalidBase64(e.to_string()))?;

    if wav_bytes.len() > max_bytes {
        return Err(AudioError::TooLarge {
            size: wav_bytes.len(),
            max: max_bytes,
        });
    }

    let (waveform, spec) = read_wav(&wav_bytes)?;

    Ok(ReferenceAudio {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        duration_seconds: waveform.duration_seconds(),
        wav_bytes,
    })
}

/// Decode WAV bytes into mono f32 samples, mixing down multi-channel input
pub fn decode_wav(bytes: &[u8]) -> Result<Waveform, AudioError> {
    read_wav(bytes).map(|(waveform, _)| waveform)
}

fn read_wav(bytes: &[u8]) -> Result<(Waveform, WavSpec), AudioError> {
    let mut reader =
        WavReader::new(Cursor::new(bytes)).map_err(|e| AudioError::InvalidWav(e.to_string()))?;
    let spec = reader.spec();

    if spec.channels == 0 || spec.sample_rate == 0 {
        return Err(AudioError::InvalidWav(format!(
            "unsupported header: {} channels at {} Hz",
            spec.channels, spec.sample_rate
        )));
    }

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Int => {
            let max = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| {
                    s.map(|v| v as f32 / max)
                        .map_err(|e| AudioError::InvalidWav(e.to_string()))
                })
                .collect::<Result<Vec<f32>, AudioError>>()?
        }
        SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map_err(|e| AudioError::InvalidWav(e.to_string())))
            .collect::<Result<Vec<f32>, AudioError>>()?,
    };

    if interleaved.is_empty() {
        return Err(AudioError::Empty);
    }

    let samples = if spec.channels > 1 {
        let ch = spec.channels as usize;
        interleaved
            .chunks(ch)
            .map(|frame| frame.iter().sum::<f32>() / ch as f32)
            .collect()
    } else {
        interleaved
    };

    Ok((Waveform::new(samples, spec.sample_rate), spec))
}

/// Encode a waveform as mono 16-bit PCM WAV
pub fn encode_wav(waveform: &Waveform) -> Result<Vec<u8>, AudioError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: waveform.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(44 + waveform.samples.len() * 2));
    {
        let mut writer = WavWriter::new(&mut cursor, spec)
            .map_err(|e| AudioError::Encode(e.to_string()))?;
        for &sample in &waveform.samples {
            let clamped = if sample.is_finite() {
                sample.clamp(-1.0, 1.0)
            } else {
                0.0
            };
            let value = (clamped * i16::MAX as f32).round() as i16;
            writer
                .write_sample(value)
                .map_err(|e| AudioError::Encode(e.to_string()))?;
        }
        writer
            .finalize()
            .map_err(|e| AudioError::Encode(e.to_string()))?;
    }

    Ok(cursor.into_inner())
}

pub fn encode_wav_base64(waveform: &Waveform) -> Result<String, AudioError> {
    let bytes = encode_wav(waveform)?;
    Ok(STANDARD.encode(bytes))
}
