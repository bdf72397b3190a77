//! Command-line front end for the `flakeid` crate.
//!
//! ```text
//! flakeid generate --count 3 --format hex
//! flakeid inspect --from base62 <ID>
//! ```

mod config;
mod telemetry;

use crate::config::{Cli, Command, Encoding, Format, GenerateConfig, InspectArgs};
use anyhow::Context;
use clap::Parser;
use flakeid::{FixedHost, FlakeId, LockFlakeGenerator, NetworkResolver, SystemClock};
use std::io::{self, BufWriter, Write};

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    telemetry::init_tracing()?;

    match cli.command {
        Command::Generate(args) => generate(GenerateConfig::try_from(args)?),
        Command::Inspect(args) => inspect(&args),
    }
}

fn generate(config: GenerateConfig) -> anyhow::Result<()> {
    let clock = SystemClock::default();
    let generator = match config.host {
        Some(host) => LockFlakeGenerator::new(&FixedHost::new(host), clock),
        None => LockFlakeGenerator::new(&NetworkResolver, clock),
    }
    .context("failed to resolve a host id")?;

    tracing::info!(
        host_id = %generator.host_id(),
        count = config.count,
        format = ?config.format,
        "generating flake ids"
    );

    let mut out = BufWriter::new(io::stdout().lock());
    for _ in 0..config.count {
        writeln!(out, "{}", render(generator.next_id(), config.format))?;
    }
    out.flush()?;
    Ok(())
}

fn inspect(args: &InspectArgs) -> anyhow::Result<()> {
    let id = decode(&args.id, args.from)
        .with_context(|| format!("could not decode {:?} as {:?}", args.id, args.from))?;
    tracing::debug!(?id, "decoded");

    let mut out = io::stdout().lock();
    writeln!(out, "raw:       {id}")?;
    writeln!(out, "hex:       {}", id.to_hex())?;
    writeln!(out, "base62:    {}", id.to_base62())?;
    writeln!(out, "timestamp: {}", id.timestamp())?;
    writeln!(out, "unix_ms:   {}", id.unix_millis())?;
    writeln!(out, "host_id:   {}", id.host_id())?;
    writeln!(out, "sequence:  {}", id.sequence())?;
    Ok(())
}

fn render(id: FlakeId, format: Format) -> String {
    match format {
        Format::Decimal => id.to_string(),
        Format::Hex => id.to_hex(),
        Format::Base62 => id.to_base62(),
        Format::Bytes => format!("{:?}", id.to_le_bytes()),
        Format::Fields => format!(
            "timestamp={} host_id={} sequence={}",
            id.timestamp(),
            id.host_id(),
            id.sequence()
        ),
    }
}

fn decode(text: &str, encoding: Encoding) -> anyhow::Result<FlakeId> {
    let text = text.trim();
    let id = match encoding {
        Encoding::Decimal => FlakeId::from_raw(text.parse::<u64>()?),
        Encoding::Hex => FlakeId::from_hex(text)?,
        Encoding::Base62 => FlakeId::from_base62(text)?,
    };
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_every_format() {
        let id = FlakeId::from_components(1000, 5, 2);
        let raw = (1000u64 << 23) | (5 << 13) | 2;

        assert_eq!(render(id, Format::Decimal), raw.to_string());
        assert_eq!(render(id, Format::Hex), format!("{raw:016x}"));
        assert_eq!(render(id, Format::Base62), id.to_base62());
        assert_eq!(render(id, Format::Bytes), format!("{:?}", raw.to_le_bytes()));
        assert_eq!(
            render(id, Format::Fields),
            "timestamp=1000 host_id=5 sequence=2"
        );
    }

    #[test]
    fn decodes_what_it_renders() {
        let id = FlakeId::from_components(987_654, 1023, 8191);
        assert_eq!(decode(&render(id, Format::Decimal), Encoding::Decimal).unwrap(), id);
        assert_eq!(decode(&render(id, Format::Hex), Encoding::Hex).unwrap(), id);
        assert_eq!(decode(&render(id, Format::Base62), Encoding::Base62).unwrap(), id);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode("12ab", Encoding::Decimal).is_err());
        assert!(decode("xyz", Encoding::Hex).is_err());
        assert!(decode("!!", Encoding::Base62).is_err());
        assert!(decode("", Encoding::Hex).is_err());
    }
}
