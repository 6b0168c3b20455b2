use crate::config::PageConfig;

/// Wrap the rendered table of contents and body in an XHTML page.
///
/// `title` is inserted as is.
pub fn assemble(title: &str, toc_html: &str, body_html: &str, page: &PageConfig) -> String {
    format!(
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd">
<html xml:lang="{lang}" lang="{lang}" xmlns="http://www.w3.org/1999/xhtml">
	<head>
		<title>{title}</title>
		<meta http-equiv="Content-Type" content="text/html; charset={charset}" />
		<link rel=stylesheet href="{stylesheet}" type="text/css" />
	</head>
	<body>
		{toc}
		{body}
	</body>
</html>
"#,
        lang = page.lang,
        title = title,
        charset = page.charset,
        stylesheet = page.stylesheet,
        toc = toc_html,
        body = body_html,
    )
}
