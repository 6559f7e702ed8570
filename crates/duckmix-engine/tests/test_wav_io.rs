//! File-level tests: load stems from disk, mix, write, and read back.

use std::f64::consts::PI;
use std::path::Path;

use duckmix_engine::wav::{compute_pcm_hash, read_wav, write_wav_file};
use duckmix_engine::{mix_files, MixError};
use duckmix_spec::MixConfig;
use hound::{SampleFormat, WavSpec, WavWriter};
use tempfile::tempdir;

fn write_tone_i16(path: &Path, freq: f64, sample_rate: u32, channels: u16, seconds: f64) {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    let frames = (sample_rate as f64 * seconds) as usize;
    for i in 0..frames {
        let v = 0.4 * (2.0 * PI * freq * i as f64 / sample_rate as f64).sin();
        for _ in 0..channels {
            writer.write_sample((v * 32767.0) as i16).unwrap();
        }
    }
    writer.finalize().unwrap();
}

fn write_tone_f32(path: &Path, freq: f64, sample_rate: u32, seconds: f64) {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    let frames = (sample_rate as f64 * seconds) as usize;
    for i in 0..frames {
        let v = 0.3 * (2.0 * PI * freq * i as f64 / sample_rate as f64).sin();
        writer.write_sample(v as f32).unwrap();
    }
    writer.finalize().unwrap();
}

#[test]
fn test_mix_files_end_to_end() {
    let dir = tempdir().unwrap();
    let voice_path = dir.path().join("voice.wav");
    let music_path = dir.path().join("music.wav");
    write_tone_f32(&voice_path, 250.0, 44100, 1.0);
    write_tone_i16(&music_path, 440.0, 48000, 2, 1.5);

    let output = mix_files(&voice_path, &music_path, &MixConfig::default()).unwrap();
    assert_eq!(output.report.channels, 2);
    assert_eq!(output.report.samples, 48000);
    assert_eq!(output.report.voice_source_rate, 44100);
    assert_eq!(output.report.music_source_rate, 48000);

    let wav = output.to_wav().unwrap();
    let out_path = dir.path().join("nested").join("out").join("mix.wav");
    write_wav_file(&out_path, &wav).unwrap();

    let bytes = std::fs::read(&out_path).unwrap();
    assert_eq!(compute_pcm_hash(&bytes).unwrap(), wav.pcm_hash);

    let reader = hound::WavReader::open(&out_path).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 48000);
    assert_eq!(reader.duration(), 48000);

    let decoded = read_wav(&out_path, "music").unwrap();
    let want = 10.0_f64.powf(-1.0 / 20.0);
    assert!((decoded.peak() - want).abs() < 1e-3);
}

#[test]
fn test_mix_files_is_deterministic() {
    let dir = tempdir().unwrap();
    let voice_path = dir.path().join("voice.wav");
    let music_path = dir.path().join("music.wav");
    write_tone_i16(&voice_path, 300.0, 48000, 1, 0.5);
    write_tone_i16(&music_path, 220.0, 48000, 1, 0.5);

    let config = MixConfig::default();
    let a = mix_files(&voice_path, &music_path, &config).unwrap().to_wav().unwrap();
    let b = mix_files(&voice_path, &music_path, &config).unwrap().to_wav().unwrap();
    assert_eq!(a.wav_data, b.wav_data);
}

#[test]
fn test_missing_music_names_role_and_path() {
    let dir = tempdir().unwrap();
    let voice_path = dir.path().join("voice.wav");
    write_tone_i16(&voice_path, 300.0, 48000, 1, 0.1);
    let missing = dir.path().join("nope.wav");

    let err = mix_files(&voice_path, &missing, &MixConfig::default()).unwrap_err();
    match &err {
        MixError::Input { role, path, .. } => {
            assert_eq!(*role, "music");
            assert_eq!(path, &missing);
        }
        other => panic!("expected input error, got {other:?}"),
    }
}

#[test]
fn test_corrupt_file_is_an_input_error() {
    let dir = tempdir().unwrap();
    let voice_path = dir.path().join("voice.wav");
    std::fs::write(&voice_path, b"this is not audio").unwrap();
    let music_path = dir.path().join("music.wav");
    write_tone_i16(&music_path, 300.0, 48000, 1, 0.1);

    let err = mix_files(&voice_path, &music_path, &MixConfig::default()).unwrap_err();
    assert_eq!(err.code(), "MIX_001");
    assert!(err.to_string().contains("voice"));
}

#[test]
fn test_write_into_missing_parent_of_file_fails_cleanly() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"x").unwrap();
    let wav = duckmix_engine::WavResult::from_pcm16(&[0, 1, 2], 1, 48000).unwrap();

    let err = write_wav_file(blocker.join("mix.wav"), &wav).unwrap_err();
    assert_eq!(err.category(), "io");
}

#[test]
fn test_failed_write_keeps_existing_destination() {
    let dir = tempdir().unwrap();
    // A non-empty directory cannot be replaced by a file rename.
    let dest = dir.path().join("mix.wav");
    std::fs::create_dir(&dest).unwrap();
    std::fs::write(dest.join("keep.txt"), b"previous take").unwrap();
    let wav = duckmix_engine::WavResult::from_pcm16(&[0, 1, 2], 1, 48000).unwrap();

    let err = write_wav_file(&dest, &wav).unwrap_err();
    assert_eq!(err.code(), "MIX_004");
    assert_eq!(std::fs::read(dest.join("keep.txt")).unwrap(), b"previous take");

    let mut names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    names.sort();
    assert_eq!(names, vec![std::ffi::OsString::from("mix.wav")]);
}

#[test]
fn test_rewrite_replaces_whole_file() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("mix.wav");
    let long = duckmix_engine::WavResult::from_pcm16(&[9; 4096], 2, 48000).unwrap();
    let short = duckmix_engine::WavResult::from_pcm16(&[1, 2], 2, 48000).unwrap();

    write_wav_file(&out_path, &long).unwrap();
    write_wav_file(&out_path, &short).unwrap();
    assert_eq!(std::fs::read(&out_path).unwrap(), short.wav_data);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}
