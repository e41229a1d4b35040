use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::{bail, Context};

/// Default size of an ICMP step, header included.
pub const DEFAULT_ICMP_SIZE: u16 = 64;

/// A single knock.
///
/// Steps parse from the knockd notation, `port[:tcp|udp]`, the protocol
/// defaulting to TCP, extended with `icmp[:size[:count]]`.
///
/// ```
/// use portknock::models::Step;
///
/// assert_eq!("7000".parse::<Step>().unwrap(), Step::Tcp { port: 7000 });
/// assert_eq!("8000:udp".parse::<Step>().unwrap(), Step::Udp { port: 8000 });
/// assert_eq!("icmp:128:3".parse::<Step>().unwrap(), Step::Icmp { size: 128, count: 3 });
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Icmp { size: u16, count: u32 },
    Tcp { port: u16 },
    Udp { port: u16 },
}

impl FromStr for Step {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<String> = s.split(':').map(|p| p.trim().to_lowercase()).collect();
        match parts.as_slice() {
            [kind, rest @ ..] if kind == "icmp" => {
                if rest.len() > 2 {
                    bail!("too many fields in ICMP step {:?}", s);
                }
                let size = match rest.first() {
                    Some(size) => size.parse().context("invalid ICMP size")?,
                    None => DEFAULT_ICMP_SIZE,
                };
                let count = match rest.get(1) {
                    Some(count) => count.parse().context("invalid ICMP count")?,
                    None => 1,
                };
                Ok(Step::Icmp { size, count })
            }
            [port] => Ok(Step::Tcp {
                port: parse_port(port)?,
            }),
            [port, protocol] => match protocol.as_str() {
                "tcp" => Ok(Step::Tcp {
                    port: parse_port(port)?,
                }),
                "udp" => Ok(Step::Udp {
                    port: parse_port(port)?,
                }),
                other => bail!("unknown protocol {:?}", other),
            },
            _ => bail!("invalid step {:?}", s),
        }
    }
}

fn parse_port(port: &str) -> anyhow::Result<u16> {
    let port: u16 = port
        .parse()
        .with_context(|| format!("invalid port {:?}", port))?;
    if port == 0 {
        bail!("port must be in 1..=65535");
    }
    Ok(port)
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Icmp { size, count } => write!(f, "icmp:{}:{}", size, count),
            Step::Tcp { port } => write!(f, "{}:tcp", port),
            Step::Udp { port } => write!(f, "{}:udp", port),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{Step, DEFAULT_ICMP_SIZE};

    #[test]
    fn test_parse_knockd_steps() {
        assert_eq!("7000".parse::<Step>().unwrap(), Step::Tcp { port: 7000 });
        assert_eq!(" 7000 : TCP ".parse::<Step>().unwrap(), Step::Tcp { port: 7000 });
        assert_eq!("9000:udp".parse::<Step>().unwrap(), Step::Udp { port: 9000 });
    }

    #[test]
    fn test_parse_icmp_steps() {
        assert_eq!(
            "icmp".parse::<Step>().unwrap(),
            Step::Icmp {
                size: DEFAULT_ICMP_SIZE,
                count: 1
            }
        );
        assert_eq!(
            "ICMP:100".parse::<Step>().unwrap(),
            Step::Icmp { size: 100, count: 1 }
        );
        assert_eq!(
            "icmp:100:5".parse::<Step>().unwrap(),
            Step::Icmp { size: 100, count: 5 }
        );
    }

    #[test]
    fn test_parse_invalid_steps() {
        assert!("0".parse::<Step>().is_err());
        assert!("65536".parse::<Step>().is_err());
        assert!("7000:sctp".parse::<Step>().is_err());
        assert!("7000:tcp:1".parse::<Step>().is_err());
        assert!("icmp:big".parse::<Step>().is_err());
        assert!("icmp:1:2:3".parse::<Step>().is_err());
        assert!("".parse::<Step>().is_err());
    }

    #[test]
    fn test_display_parses_back() {
        for step in [
            Step::Tcp { port: 1 },
            Step::Udp { port: 65535 },
            Step::Icmp { size: 8, count: 2 },
        ] {
            assert_eq!(step.to_string().parse::<Step>().unwrap(), step);
        }
    }
}
