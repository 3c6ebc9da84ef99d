/// STL reader producing model-space points for the pipeline
///
/// Facet normals and attribute bytes are read past; only vertex positions
/// are kept, three per facet, in file order.
use log::debug;
use nom::{
    bytes::complete::tag,
    character::complete::{multispace0, multispace1, not_line_ending},
    combinator::{map, opt},
    multi::many0,
    number::complete::double,
    sequence::{preceded, tuple},
    IResult,
};
use thiserror::Error;

use crate::vector::Vector;

const HEADER_LEN: usize = 80;
const FACET_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StlError {
    #[error("file too small to be a valid STL ({0} bytes)")]
    TooShort(usize),
    #[error("binary STL truncated: header declares {declared} facets, data holds {available}")]
    Truncated { declared: usize, available: usize },
    #[error("failed to parse ASCII STL: {0}")]
    Ascii(String),
}

/// Read vertex positions from a binary STL.
pub fn parse_binary_stl(data: &[u8]) -> Result<Vec<Vector>, StlError> {
    if data.len() < HEADER_LEN + 4 {
        return Err(StlError::TooShort(data.len()));
    }

    let count_bytes = [
        data[HEADER_LEN],
        data[HEADER_LEN + 1],
        data[HEADER_LEN + 2],
        data[HEADER_LEN + 3],
    ];
    let declared = u32::from_le_bytes(count_bytes) as usize;
    let body = &data[HEADER_LEN + 4..];
    let available = body.len() / FACET_LEN;
    if available < declared {
        return Err(StlError::Truncated {
            declared,
            available,
        });
    }

    let mut points = Vec::with_capacity(declared * 3);
    for facet in body.chunks_exact(FACET_LEN).take(declared) {
        // 12 bytes of normal, three 12-byte vertices, 2 attribute bytes
        for vertex in facet[12..48].chunks_exact(12) {
            points.push(Vector::from_nonempty(vec![
                read_f32(&vertex[0..4]),
                read_f32(&vertex[4..8]),
                read_f32(&vertex[8..12]),
            ]));
        }
    }
    debug!("binary STL: {} facets, {} points", declared, points.len());
    Ok(points)
}

fn read_f32(bytes: &[u8]) -> f64 {
    f64::from(f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Read vertex positions from an ASCII STL.
pub fn parse_ascii_stl(input: &str) -> Result<Vec<Vector>, StlError> {
    match solid(input) {
        Ok((_, points)) => {
            debug!("ASCII STL: {} points", points.len());
            Ok(points)
        }
        Err(e) => Err(StlError::Ascii(e.to_string())),
    }
}

fn solid(input: &str) -> IResult<&str, Vec<Vector>> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    let (input, _) = opt(not_line_ending)(input)?;
    let (input, facets) = many0(facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;
    let (input, _) = opt(not_line_ending)(input)?;
    Ok((input, facets.into_iter().flatten().collect()))
}

fn facet(input: &str) -> IResult<&str, [Vector; 3]> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, _normal) = triple(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, (a, b, c)) = tuple((vertex, vertex, vertex))(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;
    Ok((input, [a, b, c]))
}

fn vertex(input: &str) -> IResult<&str, Vector> {
    preceded(
        preceded(multispace0, tag("vertex")),
        map(triple, |(x, y, z)| Vector::from_nonempty(vec![x, y, z])),
    )(input)
}

fn triple(input: &str) -> IResult<&str, (f64, f64, f64)> {
    let (input, x) = preceded(multispace1, double)(input)?;
    let (input, y) = preceded(multispace1, double)(input)?;
    let (input, z) = preceded(multispace1, double)(input)?;
    Ok((input, (x, y, z)))
}

/// Detect and parse STL file (binary or ASCII)
///
/// Binary files may also start with `solid`, so ASCII is only chosen when
/// the text actually parses.
pub fn parse_stl(data: &[u8]) -> Result<Vec<Vector>, StlError> {
    if data.starts_with(b"solid") {
        if let Ok(points) = std::str::from_utf8(data)
            .map_err(|e| StlError::Ascii(e.to_string()))
            .and_then(parse_ascii_stl)
        {
            return Ok(points);
        }
    }
    parse_binary_stl(data)
}
