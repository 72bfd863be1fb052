//! Self-contained HTML envelope that word processors accept on paste or open.

use waliadmin_report::escape_markup;

const STYLE: &str = "\
body { font-family: 'Times New Roman', serif; line-height: 1.5; color: #000; }
table { width: 100%; border-collapse: collapse; margin-bottom: 20px; }
th, td { border: 1px solid black; padding: 8px; text-align: left; vertical-align: top; font-size: 11pt; }
th { background-color: #f2f2f2; font-weight: bold; }
.header { text-align: center; margin-bottom: 30px; border-bottom: 3px double black; padding-bottom: 10px; }
.header h1 { font-size: 16pt; margin: 0; text-transform: uppercase; }
.header p { margin: 2px 0; font-size: 10pt; }
.doc-title { text-align: center; font-size: 14pt; font-weight: bold; margin-bottom: 20px; text-decoration: underline; text-transform: uppercase; }
.footer { margin-top: 40px; }
.sig-container { display: flex; justify-content: space-between; margin-top: 30px; }
.sig-box { text-align: center; width: 200px; }
.sig-space { height: 60px; }
";

/// Wrap a rendered body in a full HTML document. `body` goes in verbatim;
/// `title` is escaped.
pub fn wrap(body: &str, title: &str) -> String {
    format!(
        "<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        escape_markup(title),
    )
}

/// Plain-text rendition of an HTML fragment or envelope, for clipboard
/// targets that cannot take markup. Only the `<body>` of an envelope counts.
pub fn plain_text(html: &str) -> String {
    let body = match (html.find("<body>"), html.rfind("</body>")) {
        (Some(start), Some(end)) if start < end => &html[start + "<body>".len()..end],
        _ => html,
    };
    let mut text = String::with_capacity(body.len());
    let mut in_tag = false;
    for c in body.chars() {
        match c {
            '<' => {
                in_tag = true;
                text.push(' ');
            }
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    let decoded = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&amp;", "&");
    decoded
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
