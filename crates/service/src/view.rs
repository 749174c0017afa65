//! HTML for the two pages of the editor.
//!
//! Rendering is a pure function of the record, the picture flag and an optional
//! notice; nothing here touches storage.

use crate::parser::profile::{BiographyRecord, Field, Gender, MAX_AGE, MIN_AGE};
use crate::form::PICTURE_EXTENSIONS;
use image::ImageFormat;

pub const PICTURE_URL: &str = "/picture";
pub const PICTURE_FIELD: &str = "profile_picture";

const STYLE: &str = "
body { margin: 0; font-family: Arial, sans-serif; display: flex; }
nav { width: 14rem; min-height: 100vh; padding: 1rem; background: #f8f9fa; }
nav a { display: block; padding: .4rem 0; color: #333; text-decoration: none; }
nav a.selected { font-weight: bold; }
main { flex: 1; padding: 1rem 2rem; max-width: 60rem; }
.title { text-align: center; }
.section-header { color: #2E86C1; font-size: 22px; font-weight: bold; }
.info { background: #e8f4fd; padding: .8rem; border-radius: 4px; }
.error { background: #fdecea; padding: .8rem; border-radius: 4px; }
.columns { display: flex; gap: 2rem; }
.profile-pic { display: block; width: 150px; }
label { display: block; margin-top: .8rem; }
input[type=text], input[type=number], select, textarea { width: 100%; box-sizing: border-box; }
";

/// Which page the navigation selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Home,
    Edit,
}

impl View {
    pub fn path(&self) -> &'static str {
        match self {
            View::Home => "/",
            View::Edit => "/edit",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Edit => "Edit Biography",
        }
    }
}

/// Short message shown above the page content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

/// Escapes text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Content type to serve stored picture bytes with.
pub fn picture_content_type(bytes: &[u8]) -> &'static str {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Png) => "image/png",
        Ok(ImageFormat::Jpeg) => "image/jpeg",
        Ok(ImageFormat::Gif) => "image/gif",
        Ok(ImageFormat::WebP) => "image/webp",
        Ok(ImageFormat::Bmp) => "image/bmp",
        _ => "application/octet-stream",
    }
}

pub fn render_page(
    view: View,
    record: &BiographyRecord,
    has_image: bool,
    notice: Option<&Notice>,
) -> String {
    let body = match view {
        View::Home => render_home(record, has_image),
        View::Edit => render_edit(record, has_image),
    };

    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str("<title>Personalized Biography</title>\n");
    push_line(&mut page, &format!("<style>{STYLE}</style>"));
    page.push_str("</head>\n<body>\n<nav>\n<h2>Navigation</h2>\n");
    for item in [View::Home, View::Edit] {
        let class = if item == view { " class=\"selected\"" } else { "" };
        push_line(&mut page, &format!("<a href=\"{}\"{class}>{}</a>", item.path(), item.label()));
    }
    page.push_str("</nav>\n<main>\n");
    match notice {
        Some(Notice::Info(message)) => {
            push_line(&mut page, &format!("<p class=\"info\">{}</p>", escape(message)));
        }
        Some(Notice::Error(message)) => {
            push_line(&mut page, &format!("<p class=\"error\">{}</p>", escape(message)));
        }
        None => {}
    }
    page.push_str(&body);
    page.push_str("</main>\n</body>\n</html>\n");
    page
}

pub fn render_home(record: &BiographyRecord, has_image: bool) -> String {
    let mut html = String::new();
    html.push_str("<h1 class=\"title\">Welcome to Your Personalized Biography!</h1>\n");
    html.push_str(
        "<p>This app helps you create and organize your biography beautifully. \
         Use the menu on the left to edit or view your biography details.</p>\n<hr>\n",
    );

    if record.is_empty() {
        html.push_str(
            "<p class=\"info\">No biography data found. Please go to the \
             <a href=\"/edit\">Edit Biography</a> page to create your profile.</p>\n",
        );
        return html;
    }

    html.push_str("<h2>Your Biography Details</h2>\n<div class=\"columns\">\n<div>\n");
    if has_image {
        push_line(&mut html, &format!(
            "<img class=\"profile-pic\" src=\"{PICTURE_URL}\" alt=\"Profile Picture\">"
        ));
    } else {
        html.push_str("<p class=\"info\">No profile picture uploaded.</p>\n");
    }
    html.push_str("</div>\n<div>\n");
    for field in Field::ALL.into_iter().filter(Field::is_basic) {
        push_line(&mut html, &format!(
            "<p><strong>{}:</strong> {}</p>",
            field.title(),
            escape(&record.display_value(field))
        ));
    }
    html.push_str("</div>\n</div>\n");

    for field in Field::ALL.into_iter().filter(|field| !field.is_basic()) {
        push_line(&mut html, &format!(
            "<h3>{}</h3>\n<p>{}</p>",
            field.title(),
            escape(&record.display_value(field))
        ));
    }
    html
}

pub fn render_edit(record: &BiographyRecord, has_image: bool) -> String {
    let mut html = String::new();
    html.push_str("<h1 class=\"title\">Edit Your Biography</h1>\n<hr>\n");

    // The picture goes through its own form so it is stored as soon as it is sent.
    html.push_str("<p class=\"section-header\">Profile Picture</p>\n");
    let accept = PICTURE_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(",");
    push_line(&mut html, &format!(
        "<form method=\"post\" action=\"{PICTURE_URL}\" enctype=\"multipart/form-data\">\n\
         <label for=\"{PICTURE_FIELD}\">Upload your profile picture</label>\n\
         <input type=\"file\" id=\"{PICTURE_FIELD}\" name=\"{PICTURE_FIELD}\" accept=\"{accept}\">\n\
         <button type=\"submit\">Upload</button>\n</form>"
    ));
    if has_image {
        push_line(&mut html, &format!(
            "<img class=\"profile-pic\" src=\"{PICTURE_URL}\" alt=\"Current Picture\">"
        ));
    }

    html.push_str(
        "<form method=\"post\" action=\"/edit\" enctype=\"multipart/form-data\">\n\
         <p class=\"section-header\">Basic Information</p>\n",
    );
    for field in Field::ALL {
        if !field.is_basic() {
            push_line(&mut html, &format!("<p class=\"section-header\">{}</p>", field.title()));
        }
        html.push_str(&render_input(record, field));
    }
    html.push_str("<p><button type=\"submit\">Save Biography</button></p>\n</form>\n");
    html
}

fn render_input(record: &BiographyRecord, field: Field) -> String {
    let key = field.key();
    let mut html = format!("<label for=\"{key}\">{}</label>\n", field.prompt());

    match field {
        Field::Age => {
            push_line(&mut html, &format!(
                "<input type=\"number\" id=\"{key}\" name=\"{key}\" min=\"{MIN_AGE}\" \
                 max=\"{MAX_AGE}\" step=\"1\" value=\"{}\" required>",
                record.age_or_default()
            ));
        }
        Field::Gender => {
            let selected = record.gender_or_default();
            push_line(&mut html, &format!("<select id=\"{key}\" name=\"{key}\">"));
            for gender in Gender::ALL {
                let flag = if gender == selected { " selected" } else { "" };
                push_line(&mut html, &format!("<option value=\"{gender}\"{flag}>{gender}</option>"));
            }
            html.push_str("</select>\n");
        }
        _ if field.is_long_text() => {
            push_line(&mut html, &format!(
                "<textarea id=\"{key}\" name=\"{key}\" rows=\"4\">{}</textarea>",
                escape(record.text_or_default(field))
            ));
        }
        _ => {
            push_line(&mut html, &format!(
                "<input type=\"text\" id=\"{key}\" name=\"{key}\" value=\"{}\">",
                escape(record.text_or_default(field))
            ));
        }
    }
    html
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
