#![allow(dead_code)]

use redmine_core::{Codec, Format, Registry};

/// Codec over the global registry in the markup format.
pub fn xml() -> Codec<'static> {
    Codec::new(Registry::global(), Format::Xml)
}

/// Codec over the global registry in the text format.
pub fn json() -> Codec<'static> {
    Codec::new(Registry::global(), Format::Json)
}

/// A full issue response, as `/issues/42.xml?include=journals,watchers,relations,children`
/// returns it. Includes an empty element and an element no schema knows.
pub const ISSUE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<issue>
  <id>42</id>
  <project id="1" name="Redmine"/>
  <tracker id="1" name="Bug"/>
  <status id="2" name="In Progress"/>
  <priority id="4" name="Normal"/>
  <author id="3" name="John Smith"/>
  <assigned_to id="5" name="Jane Doe"/>
  <category id="7" name="UI"/>
  <fixed_version id="2" name="1.0"/>
  <parent id="40"/>
  <subject>Crash on save</subject>
  <description>Steps &amp; details</description>
  <start_date>2024-03-01</start_date>
  <due_date/>
  <done_ratio>30</done_ratio>
  <is_private>false</is_private>
  <estimated_hours>4.5</estimated_hours>
  <spent_hours>1.25</spent_hours>
  <custom_fields type="array">
    <custom_field id="2" name="Affected version"><value>1.0.3</value></custom_field>
    <custom_field id="3" name="Platforms" multiple="true">
      <value type="array"><value>Linux</value><value>Windows</value></value>
    </custom_field>
  </custom_fields>
  <created_on>2024-03-01T09:30:00Z</created_on>
  <updated_on>2024-03-02T10:00:00Z</updated_on>
  <closed_on></closed_on>
  <sprocket kind="unknown"><gear/></sprocket>
  <journals type="array">
    <journal id="100">
      <user id="3" name="John Smith"/>
      <notes>Looking into it</notes>
      <created_on>2024-03-01T10:00:00Z</created_on>
      <private_notes>false</private_notes>
      <details type="array">
        <detail property="attr" name="status_id">
          <old_value>1</old_value>
          <new_value>2</new_value>
        </detail>
      </details>
    </journal>
  </journals>
  <watchers type="array">
    <user id="5" name="Jane Doe"/>
  </watchers>
  <relations type="array">
    <relation id="9" issue_id="42" issue_to_id="43" relation_type="blocks" delay=""/>
  </relations>
  <children type="array">
    <issue id="44">
      <tracker id="1" name="Bug"/>
      <subject>Child</subject>
    </issue>
  </children>
</issue>"#;
