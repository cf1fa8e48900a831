use notegen::layout;
use notegen::model::QnaPair;
use notegen::render::to_pdf_bytes;
use sha2::{Digest, Sha256};

fn sample_pairs() -> Vec<QnaPair> {
    vec![
        QnaPair::new(
            "What is photosynthesis?",
            "# Photosynthesis\nPlants convert light into chemical energy.\n\n\
             ## Key Points\n- Occurs in chloroplasts\n- Produces oxygen\n",
        ),
        QnaPair::new(
            "Explain the water cycle",
            "Evaporation lifts water into the atmosphere, condensation forms \
             clouds and precipitation returns it to the surface.\n",
        ),
    ]
}

fn render_sample_pdf() -> Vec<u8> {
    let document = layout::render(&sample_pairs(), "2024-05-01");
    to_pdf_bytes(&document, "AI-Generated Study Notes").expect("render sample pdf")
}

fn scrub_pdf(bytes: &[u8]) -> Vec<u8> {
    fn scrub_segment(data: &mut [u8], tag: &[u8], terminator: u8) {
        let mut index = 0;
        while index + tag.len() < data.len() {
            if data[index..].starts_with(tag) {
                let mut cursor = index + tag.len();
                while cursor < data.len() {
                    let byte = data[cursor];
                    if byte == terminator {
                        break;
                    }
                    if terminator == b')' {
                        data[cursor] = b'0';
                    } else if !matches!(byte, b'<' | b'>' | b' ' | b'\n' | b'\r' | b'\t') {
                        data[cursor] = b'0';
                    }
                    cursor += 1;
                }
                index = cursor;
            } else {
                index += 1;
            }
        }
    }

    fn scrub_xml(data: &mut [u8], start: &[u8], end: &[u8]) {
        let mut offset = 0;
        while offset + start.len() < data.len() {
            if let Some(start_pos) = data[offset..]
                .windows(start.len())
                .position(|window| window == start)
            {
                let start_index = offset + start_pos + start.len();
                if let Some(end_pos) = data[start_index..]
                    .windows(end.len())
                    .position(|window| window == end)
                {
                    for byte in &mut data[start_index..start_index + end_pos] {
                        if !matches!(*byte, b'<' | b'>' | b'/' | b' ' | b'\n' | b'\r' | b'\t') {
                            *byte = b'0';
                        }
                    }
                    offset = start_index + end_pos + end.len();
                } else {
                    break;
                }
            } else {
                break;
            }
        }
    }

    let mut normalized = bytes.to_vec();
    scrub_segment(&mut normalized, b"/CreationDate(", b')');
    scrub_segment(&mut normalized, b"/ModDate(", b')');
    scrub_segment(&mut normalized, b"/ID[", b']');
    scrub_segment(&mut normalized, b"/Producer(", b')');
    scrub_xml(&mut normalized, b"<xmp:CreateDate>", b"</xmp:CreateDate>");
    scrub_xml(&mut normalized, b"<xmp:ModifyDate>", b"</xmp:ModifyDate>");
    scrub_xml(
        &mut normalized,
        b"<xmp:MetadataDate>",
        b"</xmp:MetadataDate>",
    );
    scrub_xml(
        &mut normalized,
        b"<xmpMM:DocumentID>",
        b"</xmpMM:DocumentID>",
    );
    scrub_xml(
        &mut normalized,
        b"<xmpMM:InstanceID>",
        b"</xmpMM:InstanceID>",
    );
    scrub_xml(&mut normalized, b"<xmpMM:VersionID>", b"</xmpMM:VersionID>");
    normalized
}

fn normalized_hash(bytes: &[u8]) -> [u8; 32] {
    let normalized = scrub_pdf(bytes);
    let digest = Sha256::digest(&normalized);
    digest.into()
}

#[test]
fn renders_non_empty_output() {
    let bytes = render_sample_pdf();
    assert!(bytes.starts_with(b"%PDF"), "output should be a PDF stream");
}

#[test]
fn rendering_is_deterministic() {
    let bytes_a = render_sample_pdf();
    let bytes_b = render_sample_pdf();

    assert_eq!(bytes_a.len(), bytes_b.len(), "PDF sizes should match");

    let hash_a = normalized_hash(&bytes_a);
    let hash_b = normalized_hash(&bytes_b);

    assert_eq!(
        hash_a, hash_b,
        "PDF renders must be deterministic after metadata normalization"
    );
}

#[test]
fn title_page_precedes_content() {
    let document = layout::render(&sample_pairs(), "2024-05-01");
    assert!(document.page_count() >= 2);
    assert!(document.pages()[0]
        .runs()
        .iter()
        .any(|run| run.text() == "AI-Generated Study Notes"));
    assert!(document.pages()[1]
        .runs()
        .iter()
        .any(|run| run.text() == "What is photosynthesis?"));
}
