// src/api/http/feed.rs
// Single-item RSS 2.0 document for the current phrase

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::config::FeedConfig;
use crate::phrase::PhraseRecord;

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// Entry identifier: `phrase-<UTC date>-<md5(text) mod 10000>`
pub fn entry_id(record: &PhraseRecord, now: DateTime<Utc>) -> String {
    let digest = u128::from_be_bytes(md5::compute(record.text.as_bytes()).0);
    format!("phrase-{}-{}", now.format("%Y-%m-%d"), digest % 10_000)
}

/// Render the feed. A fresh document is built for every request.
pub fn render_feed(config: &FeedConfig, record: &PhraseRecord, now: DateTime<Utc>) -> Result<String> {
    let self_url = format!("{}/rss", config.base_url);
    let entry_link = format!("{}/phrase/{}", config.base_url, now.format("%Y-%m-%d"));
    let timestamp = now.to_rfc2822();

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    rss.push_attribute(("xmlns:atom", ATOM_NS));
    writer.write_event(Event::Start(rss))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    text_element(&mut writer, "title", &config.title)?;
    text_element(&mut writer, "link", &config.base_url)?;
    text_element(&mut writer, "description", &config.description)?;

    let mut atom_link = BytesStart::new("atom:link");
    atom_link.push_attribute(("href", self_url.as_str()));
    atom_link.push_attribute(("rel", "self"));
    atom_link.push_attribute(("type", "application/rss+xml"));
    writer.write_event(Event::Empty(atom_link))?;

    text_element(&mut writer, "language", &config.language)?;
    text_element(&mut writer, "managingEditor", &config.editor)?;
    text_element(&mut writer, "webMaster", &config.editor)?;
    text_element(&mut writer, "lastBuildDate", &timestamp)?;

    writer.write_event(Event::Start(BytesStart::new("item")))?;
    text_element(&mut writer, "title", &record.text)?;
    text_element(&mut writer, "link", &entry_link)?;
    text_element(&mut writer, "description", &record.attributed())?;

    let mut guid = BytesStart::new("guid");
    guid.push_attribute(("isPermaLink", "false"));
    writer.write_event(Event::Start(guid))?;
    writer.write_event(Event::Text(BytesText::new(&entry_id(record, now))))?;
    writer.write_event(Event::End(BytesEnd::new("guid")))?;

    text_element(&mut writer, "pubDate", &timestamp)?;
    writer.write_event(Event::End(BytesEnd::new("item")))?;

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    Ok(String::from_utf8(writer.into_inner())?)
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
