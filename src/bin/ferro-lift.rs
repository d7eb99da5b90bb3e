// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-lift CLI
//!
//! Command-line interface for lifting genomic coordinates and consumer
//! SNP-array files between genome builds.

use clap::{Parser, Subcommand};
use ferro_liftover::compress;
use ferro_liftover::liftover::{lift, ChainFile};
use ferro_liftover::names::GenomeBuild;
use ferro_liftover::snparray::{self, SnpReader};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ferro-lift")]
#[command(author, version, about = "Genome build liftover for coordinates and SNP-array files")]
#[command(
    long_about = "Lift genomic coordinates between genome builds using UCSC chain files.

Examples:
  ferro-lift lift --chain hg19ToHg38.over.chain.gz chr1:143342816
  ferro-lift lift --chain hg19ToHg38.over.chain.gz -i positions.txt
  echo 'chr1:143342816' | ferro-lift lift --chain hg19ToHg38.over.chain.gz -i -
  ferro-lift lift-snps --chain b37ToHg38.over.chain.gz genome.txt -o lifted.tsv.gz
  ferro-lift stats hg19ToHg38.over.chain.gz"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lift genomic coordinates through a chain file
    Lift {
        /// Positions to lift (e.g., chr1:143342816)
        positions: Vec<String>,

        /// Input file with one CHROM:POS per line (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Chain file (e.g., hg19ToHg38.over.chain.gz)
        #[arg(long, required = true)]
        chain: PathBuf,

        /// Source genome build (NCBI36, GRCh37, GRCh38, T2T-CHM13v2.0)
        #[arg(long, default_value = "GRCh37")]
        from: String,

        /// Output file (default: stdout; .gz/.lz4/.xz/.zst compress)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Lift every SNP in a consumer SNP-array export
    LiftSnps {
        /// SNP-array file (23andMe, AncestryDNA, or generic CSV/TSV)
        input: PathBuf,

        /// Chain file (e.g., hg19ToHg38.over.chain.gz)
        #[arg(long, required = true)]
        chain: PathBuf,

        /// Output file (default: stdout; .gz/.lz4/.xz/.zst compress)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Drop rows whose position cannot be lifted
        #[arg(long)]
        skip_unmapped: bool,
    },

    /// Summarize a chain file
    Stats {
        /// Chain file (e.g., hg19ToHg38.over.chain.gz)
        chain: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Lift {
            positions,
            input,
            chain,
            from,
            output,
        } => run_lift(&positions, input.as_ref(), &chain, &from, output.as_ref()),
        Commands::LiftSnps {
            input,
            chain,
            output,
            skip_unmapped,
        } => run_lift_snps(&input, &chain, output.as_ref(), skip_unmapped),
        Commands::Stats { chain } => run_stats(&chain),
    }
}

/// Open the output target, compressing when the extension asks for it.
fn open_output(output: Option<&PathBuf>) -> Result<Box<dyn Write>, Box<dyn std::error::Error>> {
    match output {
        Some(path) if path.to_string_lossy() != "-" => {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_ascii_lowercase());
            let file = File::create(path)?;
            match ext.as_deref() {
                Some("gz") | Some("lz4") | Some("xz") | Some("zst") | Some("zstd") => {
                    Ok(compress::compress(path, file)?)
                }
                _ => Ok(Box::new(file)),
            }
        }
        _ => Ok(Box::new(io::stdout())),
    }
}

/// Split a `CHROM:POS` argument into its parts.
fn parse_position(value: &str) -> Result<(String, i64), Box<dyn std::error::Error>> {
    match value.rsplit_once(':') {
        Some((chromosome, position)) if !chromosome.is_empty() => {
            let position = position
                .parse()
                .map_err(|_| format!("invalid position in '{}'", value))?;
            Ok((chromosome.to_string(), position))
        }
        _ => Err(format!("expected CHROM:POS, got '{}'", value).into()),
    }
}

fn run_lift(
    positions: &[String],
    input: Option<&PathBuf>,
    chain: &PathBuf,
    from: &str,
    output: Option<&PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let from_build: GenomeBuild = from.parse()?;
    let chain_file = ChainFile::from_file(chain)?;
    let mut writer = open_output(output)?;

    let mut lifted = 0usize;
    let mut unmapped = 0usize;

    let mut process = |value: &str,
                       writer: &mut dyn Write|
     -> Result<(), Box<dyn std::error::Error>> {
        let (chromosome, position) = parse_position(value)?;
        match lift(&chain_file, from_build, &chromosome, position) {
            Ok(new_position) => {
                lifted += 1;
                writeln!(writer, "{}\t{}\t{}", chromosome, position, new_position)?;
            }
            Err(e) if e.is_not_found() => {
                unmapped += 1;
                writeln!(writer, "{}\t{}\t-", chromosome, position)?;
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    };

    if !positions.is_empty() {
        for value in positions {
            process(value, &mut writer)?;
        }
    } else if let Some(input_path) = input {
        let reader: Box<dyn BufRead> = if input_path.to_string_lossy() == "-" {
            Box::new(BufReader::new(io::stdin()))
        } else {
            Box::new(BufReader::new(File::open(input_path)?))
        };
        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim();
            if !trimmed.is_empty() && !trimmed.starts_with('#') {
                process(trimmed, &mut writer)?;
            }
        }
    } else {
        return Err("no positions given; pass CHROM:POS arguments or --input".into());
    }

    writer.flush()?;
    eprintln!("Lifted {} positions, {} unmapped", lifted, unmapped);

    Ok(())
}

fn run_lift_snps(
    input: &PathBuf,
    chain: &PathBuf,
    output: Option<&PathBuf>,
    skip_unmapped: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let chain_file = ChainFile::from_file(chain)?;

    let file = File::open(input)?;
    let decoded = compress::decompress(file)?;
    let mut snp_reader = snparray::open(decoded)?;
    let from_build = snp_reader.genome_build();

    let mut writer = open_output(output)?;
    writeln!(
        writer,
        "rsid\tchromosome\tposition\tlifted_position\tgenotype"
    )?;

    // Row count is unknown up front, so tick a spinner instead of a bar.
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {pos} SNPs {msg}")
            .unwrap(),
    );

    let mut lifted = 0usize;
    let mut unmapped = 0usize;

    loop {
        let snp = match snp_reader.read() {
            Ok(Some(snp)) => snp,
            Ok(None) => break,
            Err(e) => return Err(e.into()),
        };
        pb.inc(1);

        match lift(&chain_file, from_build, &snp.chromosome, snp.position) {
            Ok(new_position) => {
                lifted += 1;
                writeln!(
                    writer,
                    "{}\t{}\t{}\t{}\t{}",
                    snp.rsid, snp.chromosome, snp.position, new_position, snp.genotype
                )?;
            }
            Err(e) if e.is_not_found() => {
                unmapped += 1;
                if !skip_unmapped {
                    writeln!(
                        writer,
                        "{}\t{}\t{}\t-\t{}",
                        snp.rsid, snp.chromosome, snp.position, snp.genotype
                    )?;
                }
            }
            Err(e) => return Err(e.into()),
        }
    }

    writer.flush()?;
    pb.finish_and_clear();
    eprintln!(
        "Lifted {} SNPs from {}, {} unmapped",
        lifted, from_build, unmapped
    );

    Ok(())
}

fn run_stats(chain: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let chain_file = ChainFile::from_file(chain)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    writeln!(
        handle,
        "{} chains, {} alignment blocks, {} chromosomes",
        chain_file.chain_count(),
        chain_file.alignment_count(),
        chain_file.chromosomes().len()
    )?;
    writeln!(handle)?;
    writeln!(handle, "chromosome\tchains\tblocks")?;

    for chromosome in chain_file.chromosomes() {
        let chains = chain_file.chains_for(chromosome);
        let mut blocks = 0usize;
        for chain in &chains {
            blocks += chain_file.alignments_for(chain.id)?.len();
        }
        writeln!(handle, "{}\t{}\t{}", chromosome, chains.len(), blocks)?;
    }

    Ok(())
}
