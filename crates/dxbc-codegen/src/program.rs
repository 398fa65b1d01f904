//! Program type and version decoding.
//!
//! A shader program chunk starts with two little-endian dwords: the version
//! token and the program length in dwords (including both header tokens).
//!
//! Version token layout:
//! - bits 0..4: minor version
//! - bits 4..8: major version
//! - bits 16..32: program type

use core::fmt;

use nom::{number::complete::le_u32, sequence::pair, IResult};

use crate::error::{CodeGenError, CodeGenResult};

/// Shader stage a program was compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramType {
    Pixel,
    Vertex,
    Geometry,
    Hull,
    Domain,
    Compute,
}

impl ProgramType {
    /// Short stage prefix used in version strings (`vs`, `ps`, ...).
    pub fn prefix(self) -> &'static str {
        match self {
            ProgramType::Pixel => "ps",
            ProgramType::Vertex => "vs",
            ProgramType::Geometry => "gs",
            ProgramType::Hull => "hs",
            ProgramType::Domain => "ds",
            ProgramType::Compute => "cs",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ProgramType::Pixel => "pixel shader",
            ProgramType::Vertex => "vertex shader",
            ProgramType::Geometry => "geometry shader",
            ProgramType::Hull => "hull shader",
            ProgramType::Domain => "domain shader",
            ProgramType::Compute => "compute shader",
        }
    }
}

impl TryFrom<u32> for ProgramType {
    type Error = CodeGenError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(ProgramType::Pixel),
            1 => Ok(ProgramType::Vertex),
            2 => Ok(ProgramType::Geometry),
            3 => Ok(ProgramType::Hull),
            4 => Ok(ProgramType::Domain),
            5 => Ok(ProgramType::Compute),
            _ => Err(CodeGenError::malformed(format!(
                "unknown program type {}",
                raw
            ))),
        }
    }
}

impl fmt::Display for ProgramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Program type plus shader model version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramVersion {
    ty: ProgramType,
    major: u32,
    minor: u32,
}

impl ProgramVersion {
    pub fn new(ty: ProgramType, major: u32, minor: u32) -> Self {
        Self { ty, major, minor }
    }

    /// Decode a version token.
    pub fn from_token(token: u32) -> CodeGenResult<Self> {
        let ty = ProgramType::try_from(token >> 16)?;
        Ok(Self {
            ty,
            major: (token >> 4) & 0xf,
            minor: token & 0xf,
        })
    }

    /// Encode back into a version token.
    pub fn token(&self) -> u32 {
        (self.ty as u32) << 16 | (self.major & 0xf) << 4 | (self.minor & 0xf)
    }

    pub fn program_type(&self) -> ProgramType {
        self.ty
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }
}

impl fmt::Display for ProgramVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.ty.prefix(), self.major, self.minor)
    }
}

/// Decoded program chunk header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramHeader {
    pub version: ProgramVersion,
    /// Program length in dwords, header included
    pub length: u32,
}

fn header_tokens(input: &[u8]) -> IResult<&[u8], (u32, u32)> {
    pair(le_u32, le_u32)(input)
}

/// Decode the header of a program chunk body.
///
/// Fails if fewer than two dwords are present, if the program type is
/// unknown, or if the declared length does not fit in `input`.
pub fn parse_program_header(input: &[u8]) -> CodeGenResult<ProgramHeader> {
    let (_, (token, length)) = header_tokens(input).map_err(|_| {
        CodeGenError::malformed(format!(
            "program header needs 8 bytes, got {}",
            input.len()
        ))
    })?;

    let version = ProgramVersion::from_token(token)?;

    if length < 2 {
        return Err(CodeGenError::malformed(format!(
            "program length {} is shorter than its header",
            length
        )));
    }
    if (length as usize) * 4 > input.len() {
        return Err(CodeGenError::malformed(format!(
            "program length {} dwords exceeds {} available bytes",
            length,
            input.len()
        )));
    }

    Ok(ProgramHeader { version, length })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(token: u32, length: u32, extra_dwords: usize) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&token.to_le_bytes());
        bytes.extend_from_slice(&length.to_le_bytes());
        bytes.resize(bytes.len() + extra_dwords * 4, 0);
        bytes
    }

    #[test]
    fn test_version_token_decoding() {
        let version = ProgramVersion::from_token(0x0001_0050).unwrap();
        assert_eq!(version.program_type(), ProgramType::Vertex);
        assert_eq!(version.major(), 5);
        assert_eq!(version.minor(), 0);
        assert_eq!(format!("{}", version), "vs_5_0");

        let pixel = ProgramVersion::from_token(0x0000_0041).unwrap();
        assert_eq!(pixel.program_type(), ProgramType::Pixel);
        assert_eq!(format!("{}", pixel), "ps_4_1");
    }

    #[test]
    fn test_version_token_roundtrip() {
        let version = ProgramVersion::new(ProgramType::Compute, 5, 1);
        assert_eq!(version.token(), 0x0005_0051);
        assert_eq!(ProgramVersion::from_token(version.token()), Ok(version));
    }

    #[test]
    fn test_unknown_program_type() {
        let result = ProgramVersion::from_token(0x0009_0050);
        assert!(matches!(result, Err(CodeGenError::MalformedProgram(msg)) if msg.contains("unknown program type 9")));
    }

    #[test]
    fn test_parse_program_header() {
        let bytes = header_bytes(0x0001_0050, 4, 2);
        let header = parse_program_header(&bytes).unwrap();
        assert_eq!(header.version, ProgramVersion::new(ProgramType::Vertex, 5, 0));
        assert_eq!(header.length, 4);
    }

    #[test]
    fn test_parse_truncated_header() {
        let bytes = [0x50, 0x00, 0x01, 0x00, 0x02];
        let result = parse_program_header(&bytes);
        assert!(matches!(result, Err(CodeGenError::MalformedProgram(msg)) if msg.contains("needs 8 bytes")));
    }

    #[test]
    fn test_parse_length_past_end() {
        let bytes = header_bytes(0x0001_0050, 10, 0);
        let result = parse_program_header(&bytes);
        assert!(matches!(result, Err(CodeGenError::MalformedProgram(msg)) if msg.contains("exceeds")));
    }

    #[test]
    fn test_parse_length_shorter_than_header() {
        let bytes = header_bytes(0x0001_0050, 1, 0);
        assert!(parse_program_header(&bytes).is_err());
    }
}
