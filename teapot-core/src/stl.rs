/// STL reader (binary and ASCII), flattened to a point cloud
use nom::{
    bytes::complete::tag,
    character::complete::{multispace0, multispace1, not_line_ending},
    combinator::map,
    multi::many0,
    number::complete::double,
    sequence::{preceded, tuple},
    IResult,
};

use crate::error::{Error, Result};
use crate::geometry::{point, Vec4};

const HEADER_LEN: usize = 80;
const RECORD_LEN: usize = 50;

/// Parse a binary STL file into its triangle corners, in file order
pub fn parse_binary_stl(data: &[u8]) -> Result<Vec<Vec4>> {
    if data.len() < HEADER_LEN + 4 {
        return Err(Error::ModelParse("file too small to be a valid STL".to_string()));
    }

    let count_bytes = [data[80], data[81], data[82], data[83]];
    let triangle_count = u32::from_le_bytes(count_bytes) as usize;
    let body = &data[HEADER_LEN + 4..];

    if body.len() < triangle_count * RECORD_LEN {
        return Err(Error::ModelParse(format!(
            "expected {} triangles but the file ends after {}",
            triangle_count,
            body.len() / RECORD_LEN
        )));
    }

    let mut vertices = Vec::with_capacity(triangle_count * 3);
    for record in body.chunks_exact(RECORD_LEN).take(triangle_count) {
        // 12 bytes of normal, then three corners, then 2 attribute bytes.
        for corner in record[12..48].chunks_exact(12) {
            vertices.push(point(
                read_f32(&corner[0..4]),
                read_f32(&corner[4..8]),
                read_f32(&corner[8..12]),
            ));
        }
    }

    Ok(vertices)
}

fn read_f32(bytes: &[u8]) -> f64 {
    f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f64
}

/// Parse an ASCII STL file into its triangle corners, in file order
pub fn parse_ascii_stl(input: &str) -> Result<Vec<Vec4>> {
    match parse_solid(input) {
        Ok((_, facets)) => Ok(facets.into_iter().flatten().collect()),
        Err(e) => Err(Error::ModelParse(format!("invalid ASCII STL: {:?}", e))),
    }
}

fn parse_solid(input: &str) -> IResult<&str, Vec<[Vec4; 3]>> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    let (input, _) = not_line_ending(input)?;
    let (input, facets) = many0(parse_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;
    Ok((input, facets))
}

fn parse_facet(input: &str) -> IResult<&str, [Vec4; 3]> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, _normal) = parse_triple(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, v0) = parse_corner(input)?;
    let (input, v1) = parse_corner(input)?;
    let (input, v2) = parse_corner(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;
    Ok((input, [v0, v1, v2]))
}

fn parse_corner(input: &str) -> IResult<&str, Vec4> {
    let (input, _) = preceded(multispace0, tag("vertex"))(input)?;
    map(parse_triple, |(x, y, z)| point(x, y, z))(input)
}

fn parse_triple(input: &str) -> IResult<&str, (f64, f64, f64)> {
    tuple((
        preceded(multispace0, double),
        preceded(multispace1, double),
        preceded(multispace1, double),
    ))(input)
}

/// Detect and parse STL file (binary or ASCII)
pub fn parse_stl(data: &[u8]) -> Result<Vec<Vec4>> {
    // Binary files may also start with "solid", so fall back on failure.
    if data.starts_with(b"solid") {
        if let Ok(text) = std::str::from_utf8(data) {
            if let Ok(vertices) = parse_ascii_stl(text) {
                return Ok(vertices);
            }
        }
    }

    parse_binary_stl(data)
}
