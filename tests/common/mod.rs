#![allow(dead_code)]

/// Reads the cross-reference table of the document by hand and checks that it agrees with the
/// bytes: every entry must point exactly at the `n 0 obj` marker of its object, and the trailer must
/// declare as many entries as the table holds. Returns the number of objects, not counting the free one.
pub fn assert_structurally_valid(bytes: &[u8]) -> usize {
    assert!(bytes.starts_with(b"%PDF-1.4\n"));
    assert!(bytes.ends_with(b"%%EOF\n"));

    // The lossy conversion widens the binary marker of the header, so offsets are only ever
    // applied to `bytes`
    let text = String::from_utf8_lossy(bytes);
    let startxref = text.rfind("startxref\n").expect("the startxref keyword is missing");
    let cross_reference_offset: usize = text[startxref + "startxref\n".len()..]
        .lines()
        .next()
        .and_then(|offset| offset.parse().ok())
        .expect("the startxref offset is malformed");
    assert!(
        bytes[cross_reference_offset..].starts_with(b"xref\n"),
        "startxref does not point at the cross-reference table"
    );

    let table = std::str::from_utf8(&bytes[cross_reference_offset..])
        .expect("the cross-reference table is not ASCII");
    let mut table_lines = table.lines().skip(1);
    let subsection = table_lines.next().expect("the subsection header is missing");
    let entry_count: usize = subsection
        .strip_prefix("0 ")
        .and_then(|count| count.parse().ok())
        .expect("the subsection header is malformed");

    let entries: Vec<&str> = table_lines.by_ref().take(entry_count).collect();
    assert_eq!(entries.len(), entry_count);
    assert_eq!(entries[0], "0000000000 65535 f ");
    for (number, entry) in entries.iter().enumerate().skip(1) {
        assert_eq!(entry.len(), 19, "the entry {:?} is not fixed-width", entry);
        assert!(entry.ends_with(" 00000 n "));
        let offset: usize = entry[..10].parse().expect("the offset is malformed");
        let marker = format!("{} 0 obj\n", number);
        assert!(
            bytes[offset..].starts_with(marker.as_bytes()),
            "the offset of object {} does not point at its marker",
            number
        );
    }

    let object_markers = text.matches(" 0 obj\n").count();
    assert_eq!(object_markers, entry_count - 1);
    assert_eq!(table_lines.next(), Some("trailer"));
    assert!(table.contains(&format!("<< /Size {} /Root ", entry_count)));

    entry_count - 1
}

/// Decodes a text string shown by a `Tj` operator, which is UTF-16BE preceded by the byte order mark.
pub fn decode_utf16_string(bytes: &[u8]) -> String {
    assert!(bytes.starts_with(&[0xFE, 0xFF]), "the byte order mark is missing");
    let code_units: Vec<u16> = bytes[2..]
        .chunks(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&code_units).expect("the text string is not valid UTF-16")
}

/// Parses the document with `lopdf` and extracts the text shown on each page, in order.
pub fn page_texts(bytes: &[u8]) -> Vec<Vec<String>> {
    let document = lopdf::Document::load_mem(bytes).expect("lopdf could not parse the document");
    document
        .get_pages()
        .into_values()
        .map(|page_id| {
            let content = document
                .get_page_content(page_id)
                .expect("the page has no content");
            lopdf::content::Content::decode(&content)
                .expect("the content stream could not be decoded")
                .operations
                .into_iter()
                .filter(|operation| operation.operator == "Tj")
                .map(|operation| match &operation.operands[0] {
                    lopdf::Object::String(bytes, lopdf::StringFormat::Hexadecimal) => {
                        decode_utf16_string(bytes)
                    }
                    operand => panic!("unexpected Tj operand {:?}", operand),
                })
                .collect()
        })
        .collect()
}
