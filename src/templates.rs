//! Inline HTML for the three user-facing pages.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

const STYLE: &str = "body{font-family:sans-serif;max-width:40rem;margin:3rem auto;padding:0 1rem}img{max-width:100%}";

pub fn home() -> String {
	page(
		"Wingscan",
		"<h1>Wingscan</h1>\
		 <p>Upload a photo of a butterfly and the classifier will name the species.</p>\
		 <p><a href=\"/input\">Identify a butterfly</a></p>",
	)
}

pub fn input() -> String {
	page(
		"Upload a photo",
		"<h1>Upload a photo</h1>\
		 <form action=\"/predict\" method=\"post\" enctype=\"multipart/form-data\">\
		 <input type=\"file\" name=\"file\" accept=\"image/*\" />\
		 <button type=\"submit\">Identify</button>\
		 </form>",
	)
}

pub fn result(label: &str, staged: &str) -> String {
	// The staged name is client-supplied, so it only ever appears
	// percent-encoded inside the image URL.
	let image_url = format!("/uploads/{}", utf8_percent_encode(staged, NON_ALPHANUMERIC));

	page(
		"Prediction",
		&format!(
			"<h1>{label}</h1>\
			 <img src=\"{image_url}\" alt=\"uploaded butterfly\" />\
			 <p><a href=\"/input\">Identify another</a></p>"
		),
	)
}

fn page(title: &str, body: &str) -> String {
	format!(
		"<!DOCTYPE html>\
		 <html lang=\"en\">\
		 <head><meta charset=\"utf-8\" /><title>{title}</title><style>{STYLE}</style></head>\
		 <body>{body}</body>\
		 </html>"
	)
}
