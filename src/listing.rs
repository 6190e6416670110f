use std::io;
use std::path::Path;

use html_escape::{encode_double_quoted_attribute, encode_text};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters that must not appear raw inside an href.
const HREF_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'%');

struct Entry {
    name: String,
    is_dir: bool,
}

/// Renders the index page for a directory that has no `index.html`: entries
/// sorted case-insensitively, directories shown with a trailing slash.
pub async fn render(url_path: &str, dir: &Path) -> io::Result<String> {
    let mut entries = Vec::new();
    let mut read_dir = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = read_dir.next_entry().await? {
        let is_dir = entry.file_type().await?.is_dir();
        let name = entry.file_name().to_string_lossy().into_owned();
        entries.push(Entry { name, is_dir });
    }
    entries.sort_by_key(|entry| entry.name.to_lowercase());

    let title = format!("Directory listing for {}", url_path);
    let mut page = String::new();
    page.push_str("<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str(&format!("<title>{}</title>\n</head>\n", encode_text(&title)));
    page.push_str(&format!("<body>\n<h1>{}</h1>\n<hr>\n<ul>\n", encode_text(&title)));
    for entry in &entries {
        let suffix = if entry.is_dir { "/" } else { "" };
        let href = format!("{}{}", utf8_percent_encode(&entry.name, HREF_ESCAPE), suffix);
        let label = format!("{}{}", entry.name, suffix);
        page.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            encode_double_quoted_attribute(&href),
            encode_text(&label),
        ));
    }
    page.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn lists_entries_sorted_with_directory_suffix() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("zebra.txt"), b"z").unwrap();
        std::fs::write(dir.path().join("Apple.txt"), b"a").unwrap();
        std::fs::create_dir(dir.path().join("media")).unwrap();

        let page = render("/", dir.path()).await.unwrap();

        assert!(page.contains("Directory listing for /"));
        assert!(page.contains("<a href=\"media/\">media/</a>"));
        let apple = page.find("Apple.txt").unwrap();
        let media = page.find("media/").unwrap();
        let zebra = page.find("zebra.txt").unwrap();
        assert!(apple < media && media < zebra);
    }

    #[tokio::test]
    async fn escapes_markup_in_names() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("<b>bold</b>.txt"), b"x").unwrap();

        let page = render("/", dir.path()).await.unwrap();

        assert!(!page.contains("<b>bold</b>.txt"));
        assert!(page.contains("&lt;b&gt;bold&lt;/b&gt;.txt"));
    }

    #[tokio::test]
    async fn percent_encodes_hrefs() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("my file.txt"), b"x").unwrap();

        let page = render("/", dir.path()).await.unwrap();

        assert!(page.contains("<a href=\"my%20file.txt\">my file.txt</a>"));
    }
}
