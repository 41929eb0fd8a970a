use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use crossbeam_channel::Sender;
use log::{info, warn};

use crate::types::MotionSample;

/// 读取结果统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReaderStats {
    pub parsed: usize,
    pub skipped: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("Failed to open sample source {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("IO error while reading samples: {0}")]
    Io(#[from] io::Error),
}

/// 从文件或标准输入读取 JSON 行样本并发送给事件线程
pub fn run_sample_reader(
    source: Option<PathBuf>,
    sender: Sender<MotionSample>,
) -> Result<ReaderStats, ReplayError> {
    match source {
        Some(path) => {
            let file = File::open(&path).map_err(|source| ReplayError::Open {
                path: path.clone(),
                source,
            })?;
            info!("Replaying motion samples from {}", path.display());
            read_samples(BufReader::new(file), &sender)
        }
        None => {
            info!("Replaying motion samples from stdin");
            read_samples(io::stdin().lock(), &sender)
        }
    }
}

/// Parses one sample per line. Blank lines are ignored, malformed lines are
/// logged and skipped. Stops early once the receiving side hangs up.
pub fn read_samples<R: BufRead>(
    reader: R,
    sender: &Sender<MotionSample>,
) -> Result<ReaderStats, ReplayError> {
    let mut stats = ReaderStats::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match MotionSample::from_payload(line.as_bytes()) {
            Ok(sample) => {
                if sender.send(sample).is_err() {
                    // 通道断开表示事件线程已退出
                    info!("Sample channel disconnected, reader exiting");
                    break;
                }
                stats.parsed += 1;
            }
            Err(e) => {
                warn!("Invalid motion sample on line {}: {}", index + 1, e);
                stats.skipped += 1;
            }
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use std::io::Cursor;
    use tempfile::tempdir;

    const LINES: &str = r#"{"accelerationIncludingGravity":{"x":0,"y":0,"z":9.8},"timestamp":10}

not json at all
{"accelerationIncludingGravity":null,"timestamp":20}
{"accelerationIncludingGravity":{"x":18,"y":-18,"z":9.8},"timestamp":30}
"#;

    #[test]
    fn test_read_samples_skips_bad_lines() {
        let (sender, receiver) = bounded(16);
        let stats = read_samples(Cursor::new(LINES), &sender).unwrap();
        assert_eq!(stats, ReaderStats { parsed: 3, skipped: 1 });

        let samples: Vec<MotionSample> = receiver.try_iter().collect();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0], MotionSample::new(0.0, 0.0, 9.8, 10));
        assert!(samples[1].acceleration_including_gravity.is_none());
        assert_eq!(samples[2].timestamp, 30);
    }

    #[test]
    fn test_read_samples_stops_when_receiver_dropped() {
        let (sender, receiver) = bounded(16);
        drop(receiver);
        let stats = read_samples(Cursor::new(LINES), &sender).unwrap();
        assert_eq!(stats.parsed, 0);
    }

    #[test]
    fn test_run_sample_reader_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("samples.jsonl");
        std::fs::write(&path, LINES).unwrap();

        let (sender, receiver) = bounded(16);
        let stats = run_sample_reader(Some(path), sender).unwrap();
        assert_eq!(stats.parsed, 3);
        assert_eq!(receiver.try_iter().count(), 3);
    }

    #[test]
    fn test_run_sample_reader_missing_file() {
        let (sender, _receiver) = bounded(1);
        let result = run_sample_reader(Some(PathBuf::from("/nonexistent/samples.jsonl")), sender);
        assert!(matches!(result, Err(ReplayError::Open { .. })));
    }
}
