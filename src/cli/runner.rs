//! CLI runner - executes commands

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use crate::cli::commands::{Cli, ColumnsFormat, Commands};
use crate::engine::{ConvertOptions, Converter};
use crate::error::{Result, ResultExt};
use crate::inspect::{InspectOptions, Inspector, NoPause, StdinPause};
use crate::reader::RecordReader;
use crate::schema::{ColumnsReport, SchemaInferrer};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Convert {
                input,
                output,
                exclude,
                integer,
                limit,
                chunk_size,
                compression,
            } => {
                let options = ConvertOptions::new()
                    .with_exclusions(exclude.clone())
                    .with_int_columns(integer.iter().cloned())
                    .with_limit(*limit)
                    .with_chunk_size(*chunk_size)
                    .with_writer_config(compression.writer_config());
                Self::convert(input, output, options)
            }
            Commands::Columns {
                input,
                exclude,
                limit,
                format,
            } => Self::columns(input, exclude, *limit, *format),
            Commands::Inspect {
                input,
                every,
                flatten,
                wait,
                limit,
            } => {
                let options = InspectOptions::new()
                    .with_every(*every)
                    .with_flatten(*flatten)
                    .with_wait(*wait)
                    .with_limit(*limit);
                Self::inspect(input, options)
            }
        }
    }

    /// Run the two-pass conversion and print the final counters
    fn convert(input: &Path, output: &Path, options: ConvertOptions) -> Result<()> {
        let stats = Converter::new(options).run(input, output)?;
        println!("{}", serde_json::to_string_pretty(&stats)?);
        Ok(())
    }

    /// Run schema inference only and print the column set
    fn columns(
        input: &Path,
        exclude: &[String],
        limit: Option<u64>,
        format: ColumnsFormat,
    ) -> Result<()> {
        let mut reader = Self::open_input(input)?;
        let inferrer = SchemaInferrer::new()
            .with_exclusions(exclude.to_vec())
            .with_limit(limit);
        let columns = inferrer.infer(&mut reader)?;
        match format {
            ColumnsFormat::Text => {
                for name in columns.iter() {
                    println!("{name}");
                }
            }
            ColumnsFormat::Json => {
                let report = ColumnsReport::new(&columns);
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }
        Ok(())
    }

    /// Stream decoded documents to stdout
    fn inspect(input: &Path, options: InspectOptions) -> Result<()> {
        let mut reader = Self::open_input(input)?;
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let wait = options.wait;
        let inspector = Inspector::new(options);
        if wait {
            inspector.run(&mut reader, &mut out, &mut StdinPause)?;
        } else {
            inspector.run(&mut reader, &mut out, &mut NoPause)?;
        }
        Ok(())
    }

    /// Open a dump file behind a buffered record reader
    fn open_input(input: &Path) -> Result<RecordReader<BufReader<File>>> {
        let file =
            File::open(input).with_context(|| format!("failed to open {}", input.display()))?;
        Ok(RecordReader::new(BufReader::new(file)))
    }
}
