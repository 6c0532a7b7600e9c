use std::{fs, path::Path};

use seqchipper::{
    pipeline::prepare_corpus,
    preprocess::PreprocessOptions,
    tokenizer::{EngineKind, MERGES_FILE, VOCAB_FILE, build_tokenizer_artifact},
};

fn bases(n: usize) -> String {
    "ACGGTCAT".chars().cycle().take(n).collect()
}

fn write_split(
    dir: &Path,
    file: &str,
    sequences: &[String],
) -> std::io::Result<()> {
    let lines: Vec<String> = sequences
        .iter()
        .map(|s| serde_json::json!({ "sequence": s }).to_string())
        .collect();
    fs::write(dir.join(file), lines.join("\n"))
}

#[test]
fn test_truncated_chunked_export() {
    tempdir::TempDir::new("seqchipper_e2e")
        .and_then(|dir| {
            let source = dir.path().join("raw_dna_data");
            let output = dir.path().join("processed_dna_data");
            fs::create_dir_all(&source)?;

            // 10 records of 1200 bases: 8 examined, each yields 1024 + 176.
            write_split(&source, "train.jsonl", &vec![bases(1200); 10])?;
            write_split(&source, "validation.jsonl", &vec![bases(600); 5])?;

            let prepared = prepare_corpus(&source, &output, &PreprocessOptions::default())
                .expect("failed to prepare corpus");

            let train = prepared.dataset.split("train").expect("train split");
            assert_eq!(train.stats.total_records, 10);
            assert_eq!(train.stats.records_examined, 8);
            assert_eq!(train.stats.chunks_accepted, 8);
            assert_eq!(train.stats.chunks_rejected, 8);

            let text = fs::read_to_string(output.join("train.txt"))?;
            let lines: Vec<&str> = text.lines().collect();
            assert_eq!(lines.len(), 8);
            assert!(lines.iter().all(|l| *l == bases(1024)));

            // 5 records: 4 examined, 600 bases is one accepted chunk each.
            let text = fs::read_to_string(output.join("validation.txt"))?;
            assert_eq!(text.lines().count(), 4);

            Ok(())
        })
        .unwrap();
}

#[test]
fn test_seeded_validation_carve() {
    tempdir::TempDir::new("seqchipper_carve")
        .and_then(|dir| {
            let source = dir.path().join("raw");
            fs::create_dir_all(&source)?;

            let sequences: Vec<String> = (0..50).map(|i| bases(300 + i)).collect();
            write_split(&source, "train-00000-of-00002.jsonl", &sequences[..25])?;
            write_split(&source, "train-00001-of-00002.jsonl", &sequences[25..])?;

            let options = PreprocessOptions::default().with_seed(Some(1234));
            let first = prepare_corpus(&source, dir.path().join("a"), &options)
                .expect("failed to prepare corpus");
            let second = prepare_corpus(&source, dir.path().join("b"), &options)
                .expect("failed to prepare corpus");
            assert_eq!(first.dataset, second.dataset);

            // 40 examined chunks; 4 carved into validation.
            assert_eq!(first.dataset.split_names(), vec!["train", "validation"]);
            let train = fs::read_to_string(dir.path().join("a").join("train.txt"))?;
            let validation = fs::read_to_string(dir.path().join("a").join("validation.txt"))?;
            assert_eq!(train.lines().count(), 36);
            assert_eq!(validation.lines().count(), 4);

            for line in validation.lines() {
                assert!(!train.lines().any(|t| t == line));
            }
            let mut all: Vec<&str> = train.lines().chain(validation.lines()).collect();
            all.sort_by_key(|l| l.len());
            let expected: Vec<String> = (0..40).map(|i| bases(300 + i)).collect();
            assert_eq!(all, expected);

            Ok(())
        })
        .unwrap();
}

#[test]
fn test_tokenize_exported_corpus() {
    tempdir::TempDir::new("seqchipper_tokenize")
        .and_then(|dir| {
            let source = dir.path().join("raw");
            let output = dir.path().join("out");
            let tokenizer_dir = dir.path().join("dna_tokenizer");
            fs::create_dir_all(&source)?;
            write_split(&source, "train.jsonl", &vec![bases(700); 5])?;

            prepare_corpus(&source, &output, &PreprocessOptions::default().with_seed(Some(0)))
                .expect("failed to prepare corpus");

            let engine = build_tokenizer_artifact(EngineKind::Native, &tokenizer_dir)
                .expect("failed to build tokenizer");
            assert!(tokenizer_dir.join(VOCAB_FILE).exists());
            assert!(tokenizer_dir.join(MERGES_FILE).exists());

            let loaded = EngineKind::Native
                .load(&tokenizer_dir)
                .expect("failed to load tokenizer");

            let train = fs::read_to_string(output.join("train.txt"))?;
            assert_eq!(train.lines().count(), 3);
            for line in train.lines() {
                let ids = engine.encode(line).expect("failed to encode");
                assert_eq!(ids.len(), line.len());
                assert_eq!(loaded.encode(line).expect("failed to encode"), ids);
                assert_eq!(loaded.decode(&ids).expect("failed to decode"), line);
            }

            Ok(())
        })
        .unwrap();
}
