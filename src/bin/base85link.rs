/*
 * Copyright (C) 2025 taylor.fish <contact@taylor.fish>
 *
 * This file is part of base85link.
 *
 * base85link is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * base85link is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with base85link. If not, see <https://www.gnu.org/licenses/>.
 */

use std::fs::File;
use std::io::{self, stdin, stdout, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result as AnyResult};
use clap::Parser;

use base85link::decode::{decode_bytes, decode_to_vec};
use base85link::encode::encode_to_bytes;
use base85link::LINK;

/// Encodes or decodes link-friendly base-85 data from [FILE] and writes the
/// result to standard output. If [FILE] is missing or "-", the data is read
/// from standard input.
#[derive(Debug, Parser)]
#[command(name = "base85link", version)]
struct Args {
    /// Decode data instead of encoding. Line breaks in the input are ignored.
    #[arg(short, long)]
    decode: bool,

    /// When decoding, fail unless the decoded data is valid UTF-8.
    #[arg(short, long, requires = "decode")]
    text: bool,

    /// Input file.
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,
}

fn input_bytes(stream: impl Read) -> impl Iterator<Item = io::Result<u8>> {
    BufReader::new(stream).bytes()
}

/// Feeds `bytes` to `f` as a plain byte iterator, stopping at the first
/// read error and returning it afterwards.
fn with_input<T>(
    bytes: impl Iterator<Item = io::Result<u8>>,
    f: impl FnOnce(&mut dyn Iterator<Item = u8>) -> T,
) -> AnyResult<T> {
    let mut read_err = None;
    let mut iter = bytes.map_while(|b| {
        b.map_err(|e| {
            read_err = Some(e);
        })
        .ok()
    });
    let result = f(&mut iter);
    drop(iter);
    match read_err {
        Some(e) => Err(e).context("could not read input"),
        None => Ok(result),
    }
}

fn encode(stream: impl Read, out: &mut impl Write) -> AnyResult<()> {
    with_input(input_bytes(stream), |bytes| {
        encode_to_bytes(bytes, &LINK).try_for_each(|b| out.write_all(&[b]))
    })?
    .context("could not write to standard output")
}

fn decode(
    stream: impl Read,
    out: &mut impl Write,
    text: bool,
) -> AnyResult<()> {
    let decoded = with_input(input_bytes(stream), |bytes| {
        let symbols = bytes.filter(|&b| !matches!(b, b'\n' | b'\r'));
        decode_to_vec(decode_bytes(symbols, &LINK))
    })?
    .context("input is not valid base-85 data")?;

    if text && std::str::from_utf8(&decoded).is_err() {
        bail!("decoded data is not valid UTF-8");
    }
    log::debug!("decoded {} bytes", decoded.len());
    out.write_all(&decoded)
        .context("could not write to standard output")
}

fn run(args: &Args) -> AnyResult<()> {
    let stream: Box<dyn Read> = match args.path.as_deref() {
        None => Box::new(stdin()),
        Some(path) if path == Path::new("-") => Box::new(stdin()),
        Some(path) => Box::new(File::open(path).with_context(|| {
            format!("could not open file '{}'", path.display())
        })?),
    };

    let mut out = BufWriter::new(stdout());
    if args.decode {
        decode(stream, &mut out, args.text)?;
    } else {
        encode(stream, &mut out)?;
    }
    out.flush().context("could not write to standard output")
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{decode, encode, Args};
    use clap::{CommandFactory, Parser};
    use std::path::Path;

    #[test]
    fn args() {
        Args::command().debug_assert();
        let args = Args::parse_from(["base85link", "-d", "--text", "in.txt"]);
        assert!(args.decode && args.text);
        assert_eq!(args.path.as_deref(), Some(Path::new("in.txt")));
        assert!(Args::try_parse_from(["base85link", "--text"]).is_err());
    }

    #[test]
    fn encodes_stream() {
        let mut out = Vec::new();
        encode(&b"asdf"[..], &mut out).unwrap();
        assert_eq!(out, b"vrk;,");
    }

    #[test]
    fn decodes_stream_ignoring_line_breaks() {
        let mut out = Vec::new();
        decode(&b"xK#0@\nzV\r\n"[..], &mut out, true).unwrap();
        assert_eq!(out, b"hello");
    }

    #[test]
    fn rejects_bad_input() {
        let mut out = Vec::new();
        assert!(decode(&b"x"[..], &mut out, false).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn text_flag_checks_utf8() {
        let mut out = Vec::new();
        assert!(decode(&b";nSc0"[..], &mut out, false).is_ok());
        let mut out = Vec::new();
        assert!(decode(&b";nSc0"[..], &mut out, true).is_err());
    }
}
