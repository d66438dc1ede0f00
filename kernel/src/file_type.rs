/// Maps a file name to a human-readable classification by its extension.
///
/// Matching is case-insensitive. Unknown extensions map to the upper-cased
/// extension itself; a name without a dot maps to an empty string.
#[must_use]
pub fn file_label(name: &str) -> String {
    let Some(ix) = name.rfind('.') else {
        return String::new();
    };
    let ext = name[ix + 1..].to_lowercase();
    let label = match ext.as_str() {
        "pdf" => "PDF Document",
        "doc" | "docx" => "Word Document",
        "xls" | "xlsx" => "Excel Spreadsheet",
        "ppt" | "pptx" => "PowerPoint",
        "jpg" | "jpeg" => "JPEG Image",
        "png" => "PNG Image",
        "gif" => "GIF Image",
        "svg" => "SVG Image",
        "mp4" => "MP4 Video",
        "mov" => "MOV Video",
        "mp3" => "MP3 Audio",
        "wav" => "WAV Audio",
        "zip" => "ZIP Archive",
        "rar" => "RAR Archive",
        "txt" => "Text File",
        "html" => "HTML File",
        "css" => "CSS File",
        "js" => "JavaScript File",
        "json" => "JSON File",
        "xml" => "XML File",
        _ => return ext.to_uppercase(),
    };
    label.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("report.PDF", "PDF Document")]
    #[case("report.pdf", "PDF Document")]
    #[case("letter.docx", "Word Document")]
    #[case("photo.JPEG", "JPEG Image")]
    #[case("photo.jpg", "JPEG Image")]
    #[case("clip.mp4", "MP4 Video")]
    #[case("site.html", "HTML File")]
    #[case("archive.xyz", "XYZ")]
    #[case("noext", "")]
    #[case("trailing.", "")]
    #[case("many.dots.tar.zip", "ZIP Archive")]
    #[trace]
    fn file_label_cases(#[case] name: &str, #[case] expected: &str) {
        // Arrange

        // Act
        let label = file_label(name);

        // Assert
        assert_eq!(label, expected);
    }
}
