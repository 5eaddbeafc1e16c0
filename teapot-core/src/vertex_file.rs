/// Line-oriented vertex list reader (the `v x y z` records of an OBJ file)
use nom::{
    bytes::complete::tag,
    character::complete::space1,
    number::complete::double,
    sequence::preceded,
    IResult,
};

use crate::geometry::{point, Vec4};

/// Read leading `v x y z` lines.
///
/// Reading stops at the first line that is not a vertex record, so the face
/// section of an OBJ file and anything after it is never looked at. Running
/// out of vertex lines is not an error.
pub fn parse_vertices(input: &str) -> Vec<Vec4> {
    let mut vertices = Vec::new();

    for (number, line) in input.lines().enumerate() {
        match parse_vertex_line(line) {
            Ok((_, vertex)) => vertices.push(vertex),
            Err(_) => {
                if is_vertex_record(line) {
                    log::warn!(
                        "line {}: malformed vertex record {:?}, stopping after {} vertices",
                        number + 1,
                        line,
                        vertices.len()
                    );
                }
                break;
            }
        }
    }

    vertices
}

fn parse_vertex_line(input: &str) -> IResult<&str, Vec4> {
    let (input, _) = tag("v")(input)?;
    let (input, x) = preceded(space1, double)(input)?;
    let (input, y) = preceded(space1, double)(input)?;
    let (input, z) = preceded(space1, double)(input)?;
    Ok((input, point(x, y, z)))
}

/// The marker has to open the line; an indented `v` is just another line.
fn is_vertex_record(line: &str) -> bool {
    line.split(char::is_whitespace).next() == Some("v")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stops_at_first_non_vertex_line() {
        let vertices = parse_vertices("v 1.0 2.0 3.0\nv -1.0 0.0 1.0\nf 1 2 3\nv 9 9 9\n");
        assert_eq!(vertices.len(), 2);
        assert_eq!(vertices[0], Vec4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(vertices[1], Vec4::new(-1.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_vertices("").is_empty());
    }

    #[test]
    fn test_normal_record_ends_vertices() {
        let vertices = parse_vertices("v 0 0 0\nvn 0 1 0\nv 1 1 1");
        assert_eq!(vertices.len(), 1);
    }

    #[test]
    fn test_malformed_vertex_ends_vertices() {
        let vertices = parse_vertices("v 0 0 0\nv 1.0 two 3.0\nv 1 1 1");
        assert_eq!(vertices.len(), 1);
    }

    #[test]
    fn test_blank_line_ends_vertices() {
        let vertices = parse_vertices("v 0 0 0\n\nv 1 1 1");
        assert_eq!(vertices.len(), 1);
    }

    #[test]
    fn test_crlf_and_extra_tokens() {
        let vertices = parse_vertices("v 1 2 3 1.0\r\nv\t4e-1 -5 6.5\r\n");
        assert_eq!(vertices.len(), 2);
        assert_eq!(vertices[0], Vec4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(vertices[1], Vec4::new(0.4, -5.0, 6.5, 1.0));
    }

    #[test]
    fn test_indented_vertex_ends_vertices() {
        let vertices = parse_vertices("v 0 0 0\n  v 1 1 1\nv 2 2 2");
        assert_eq!(vertices.len(), 1);
        assert_eq!(vertices[0], Vec4::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_leading_comment_yields_nothing() {
        assert!(parse_vertices("# teapot\nv 0 0 0").is_empty());
    }
}
