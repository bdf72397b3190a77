use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use flakeid::HostId;

/// Generate and inspect 64-bit Flake IDs.
///
/// Every flag can also be supplied through the environment (or a `.env`
/// file in the working directory).
#[derive(Parser, Debug)]
#[command(name = "flakeid", version, about = "Generate and inspect Flake IDs")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate IDs and print one per line
    Generate(GenerateArgs),
    /// Decode an ID and print its fields
    Inspect(InspectArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Number of IDs to generate.
    ///
    /// Environment variable: `FLAKE_COUNT`
    #[arg(short = 'n', long, env = "FLAKE_COUNT", default_value_t = 1)]
    pub count: usize,

    /// Output encoding for each ID.
    ///
    /// Environment variable: `FLAKE_FORMAT`
    #[arg(short, long, env = "FLAKE_FORMAT", value_enum, default_value_t = Format::Decimal)]
    pub format: Format,

    /// Use this host ID instead of deriving one from the machine's IPv4
    /// address. Must be at most 1023.
    ///
    /// Environment variable: `FLAKE_HOST_ID`
    #[arg(long, env = "FLAKE_HOST_ID")]
    pub host_id: Option<u16>,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// The ID to decode.
    pub id: String,

    /// Encoding of the supplied ID.
    #[arg(long, value_enum, default_value_t = Encoding::Decimal)]
    pub from: Encoding,
}

/// How `generate` prints each ID.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Raw `u64` in decimal
    Decimal,
    /// 16 lowercase hex digits
    Hex,
    /// Base62 text of the little-endian bytes
    Base62,
    /// Little-endian byte array
    Bytes,
    /// Decoded timestamp, host ID and sequence
    Fields,
}

/// Text encodings `inspect` can decode.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    Decimal,
    Hex,
    Base62,
}

/// Validated settings for the `generate` command.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub count: usize,
    pub format: Format,
    /// `None` means resolve the host ID from the network configuration.
    pub host: Option<HostId>,
}

impl TryFrom<GenerateArgs> for GenerateConfig {
    type Error = anyhow::Error;

    fn try_from(args: GenerateArgs) -> Result<Self, Self::Error> {
        if args.count == 0 {
            bail!("FLAKE_COUNT must be greater than 0");
        }

        let host = args
            .host_id
            .map(HostId::new)
            .transpose()
            .context("invalid FLAKE_HOST_ID")?;

        Ok(Self {
            count: args.count,
            format: args.format,
            host,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(count: usize, host_id: Option<u16>) -> GenerateArgs {
        GenerateArgs {
            count,
            format: Format::Hex,
            host_id,
        }
    }

    #[test]
    fn accepts_valid_args() {
        let config = GenerateConfig::try_from(args(3, Some(1023))).unwrap();
        assert_eq!(config.count, 3);
        assert_eq!(config.format, Format::Hex);
        assert_eq!(config.host, Some(HostId::new(1023).unwrap()));

        let config = GenerateConfig::try_from(args(1, None)).unwrap();
        assert_eq!(config.host, None);
    }

    #[test]
    fn rejects_zero_count() {
        let err = GenerateConfig::try_from(args(0, None)).unwrap_err();
        assert!(err.to_string().contains("greater than 0"));
    }

    #[test]
    fn rejects_oversized_host_id() {
        let err = GenerateConfig::try_from(args(1, Some(1024))).unwrap_err();
        assert_eq!(err.to_string(), "invalid FLAKE_HOST_ID");
        assert!(format!("{err:#}").contains("host id 1024 exceeds the maximum of 1023"));
    }

    #[test]
    fn parses_command_line() {
        let cli = Cli::try_parse_from([
            "flakeid", "generate", "-n", "4", "--format", "base62", "--host-id", "7",
        ])
        .unwrap();
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.count, 4);
        assert_eq!(args.format, Format::Base62);
        assert_eq!(args.host_id, Some(7));

        let cli = Cli::try_parse_from(["flakeid", "inspect", "--from", "hex", "ff"]).unwrap();
        let Command::Inspect(args) = cli.command else {
            panic!("expected inspect");
        };
        assert_eq!(args.id, "ff");
        assert_eq!(args.from, Encoding::Hex);
    }
}
