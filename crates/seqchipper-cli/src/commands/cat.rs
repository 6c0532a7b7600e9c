use std::io::{BufRead, Write};

use seqchipper::tokenizer::TokenizerEngine;

use crate::{
    common::ArtifactArgs,
    input_output::{InputArgs, OutputArgs},
    logging::LogArgs,
};

/// The tokenizer mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerMode {
    /// Encode from bases to token ids.
    Encode,

    /// Decode from token ids to bases.
    Decode,
}

/// Tokenizer mode argument group.
#[derive(clap::Args, Debug)]
#[group(required = true, multiple = false)]
pub struct TokenizerModeArgs {
    /// Encode from bases to token ids.
    #[arg(long, action=clap::ArgAction::SetTrue)]
    encode: bool,

    /// Decode from token ids to bases.
    #[arg(long, action=clap::ArgAction::SetTrue)]
    decode: bool,
}

impl TokenizerModeArgs {
    /// Get the tokenizer mode.
    pub fn mode(&self) -> TokenizerMode {
        if self.decode {
            TokenizerMode::Decode
        } else {
            TokenizerMode::Encode
        }
    }
}

/// Args for the cat command.
#[derive(clap::Args, Debug)]
pub struct CatArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    #[command(flatten)]
    artifact: ArtifactArgs,

    #[command(flatten)]
    mode: TokenizerModeArgs,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl CatArgs {
    /// Run the cat command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        // Warnings only; stdout may be the data stream.
        self.logging.setup_logging(2)?;

        let engine = self.artifact.load()?;

        let mut reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;

        match self.mode.mode() {
            TokenizerMode::Encode => run_cat_encode(&mut reader, &mut writer, engine.as_ref())?,
            TokenizerMode::Decode => run_cat_decode(&mut reader, &mut writer, engine.as_ref())?,
        }

        Ok(())
    }
}

fn run_cat_encode(
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
    engine: &dyn TokenizerEngine,
) -> Result<(), Box<dyn std::error::Error>> {
    for line in reader.lines() {
        let line = line?;
        let ids = engine.encode(line.trim_end_matches('\r'))?;

        for (idx, id) in ids.iter().enumerate() {
            write!(writer, "{}{}", if idx == 0 { "" } else { " " }, id)?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

fn run_cat_decode(
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
    engine: &dyn TokenizerEngine,
) -> Result<(), Box<dyn std::error::Error>> {
    for line in reader.lines() {
        let ids = line?
            .split_whitespace()
            .map(str::parse::<u32>)
            .collect::<Result<Vec<u32>, _>>()?;

        writeln!(writer, "{}", engine.decode(&ids)?)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use seqchipper::tokenizer::{DnaVocab, MergeRules, VocabTokenizer};

    use super::*;

    fn engine() -> VocabTokenizer {
        VocabTokenizer::build_from_vocabulary(&DnaVocab::default(), &MergeRules::empty()).unwrap()
    }

    #[test]
    fn test_cat_encode() {
        let mut reader = "ACGT\nGATTACA\r\n\n".as_bytes();
        let mut out: Vec<u8> = Vec::new();
        run_cat_encode(&mut reader, &mut out, &engine()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1 2 3 4\n3 1 4 4 1 2 1\n\n");

        let mut reader = "ACNT\n".as_bytes();
        let mut out: Vec<u8> = Vec::new();
        assert!(run_cat_encode(&mut reader, &mut out, &engine()).is_err());
    }

    #[test]
    fn test_cat_decode() {
        let mut reader = "1 2 3 4\n  3 1 4 4 1 2 1 \n".as_bytes();
        let mut out: Vec<u8> = Vec::new();
        run_cat_decode(&mut reader, &mut out, &engine()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "ACGT\nGATTACA\n");

        for bad in ["1 x 3\n", "1 7\n"] {
            let mut reader = bad.as_bytes();
            let mut out: Vec<u8> = Vec::new();
            assert!(run_cat_decode(&mut reader, &mut out, &engine()).is_err(), "{bad}");
        }
    }
}
