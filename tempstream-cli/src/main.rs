use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::sync::Arc;
use tempstream::{Builder, TempFileStream, TracingLogger};

#[derive(Debug, Parser)]
#[command(name = "tempstream")]
#[command(about = "Demo programs for self-deleting temp-file streams")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write a few bytes and let scope exit clean up
    Basic,
    /// Write numbered lines, rewind, and read them back
    WriteRead {
        /// Number of lines to write
        #[arg(long, default_value_t = 5)]
        lines: usize,
    },
}

fn main() -> Result<()> {
    tempstream_core::logging::init()?;

    let args = Args::parse();
    match args.command {
        Command::Basic => basic(),
        Command::WriteRead { lines } => write_read(lines),
    }
}

fn basic() -> Result<()> {
    let path;
    {
        let mut stream = TempFileStream::new().context("Failed to create temp stream")?;
        path = stream.path().to_path_buf();

        stream.write_all(b"Test")?;
        // Flush forces write to disk
        stream.flush()?;

        println!("Wrote 4 bytes to {}", path.display());
        println!("File exists inside the scope: {}", path.exists());
    }
    // As soon as we leave the scope, the temp file is deleted
    println!("File exists after the scope: {}", path.exists());
    Ok(())
}

fn write_read(lines: usize) -> Result<()> {
    let mut stream = Builder::new()
        .logger(Arc::new(TracingLogger))
        .open()
        .context("Failed to create temp stream")?;
    let path = stream.path().to_path_buf();

    {
        let mut writer = BufWriter::new(&mut stream);
        for i in 0..lines {
            writeln!(writer, "Test {}", i)?;
        }
        // Making sure the data reaches the file and is not still in a buffer
        writer.flush()?;
    }

    println!("Data has been written");
    println!("Temp file is at: {}", path.display());

    // Reset the position before reading back what was written
    stream.set_position(0)?;

    {
        let reader = BufReader::new(&mut stream);
        for line in reader.lines() {
            println!("{}", line?);
        }
    }

    println!("File exists before close: {}", path.exists());
    stream.close()?;
    println!("File exists after close: {}", path.exists());
    Ok(())
}
