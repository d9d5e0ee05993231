use base64::{engine::general_purpose::STANDARD, Engine as _};
use chatterbox_serverless::domain::audio::decode_wav;
use serde_json::Value;

/// Check a SynthesisResponse body and return the decoded sample count
#[allow(dead_code)]
pub fn assert_synthesis_output(output: &Value, expected_rate: u32) -> usize {
    let sample_rate = output
        .get("sample_rate")
        .and_then(|v| v.as_u64())
        .expect("Missing sample_rate");
    assert_eq!(sample_rate, expected_rate as u64);

    let duration = output
        .get("duration_seconds")
        .and_then(|v| v.as_f64())
        .expect("Missing duration_seconds");
    assert!(duration > 0.0, "duration_seconds should be positive");

    let audio = output
        .get("audio_base64")
        .and_then(|v| v.as_str())
        .expect("Missing audio_base64");
    let wav = STANDARD.decode(audio).expect("audio_base64 is not base64");
    assert_eq!(&wav[0..4], b"RIFF", "audio is not a RIFF/WAV stream");

    let waveform = decode_wav(&wav).expect("audio_base64 is not a valid WAV");
    assert_eq!(waveform.sample_rate, expected_rate);

    let expected_duration = waveform.duration_seconds();
    assert!(
        (duration - expected_duration).abs() <= 0.005,
        "duration_seconds {} does not match {} samples",
        duration,
        waveform.samples.len()
    );

    waveform.samples.len()
}

#[allow(dead_code)]
pub fn assert_error_body(error: &Value, expected_code: &str) {
    let code = error.get("error").and_then(|v| v.as_str()).unwrap();
    assert_eq!(code, expected_code, "Error code mismatch");
    assert!(
        error.get("message").and_then(|v| v.as_str()).is_some(),
        "Missing error message"
    );
}
