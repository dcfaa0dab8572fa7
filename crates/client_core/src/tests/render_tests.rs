use super::*;
use crate::surface::{EntryKind, Transcript};
use shared::protocol::{ResponsePart, StyledSpan};

fn renderer() -> Renderer<Transcript> {
    Renderer::new(Transcript::new())
}

fn part(texts: &[&str]) -> ResponsePart {
    ResponsePart::new(texts.iter().map(|text| StyledSpan::plain(*text)).collect())
}

fn spacer_count(transcript: &Transcript) -> usize {
    transcript
        .entries()
        .filter(|entry| entry.kind == EntryKind::Spacer)
        .count()
}

#[test]
fn single_part_adds_text_and_spacer() {
    let mut renderer = renderer();

    renderer.render(&ResponseEnvelope::single(part(&["ok"])));

    assert_eq!(renderer.surface().texts(), vec!["ok", "\n"]);
    assert!(!renderer.last_ephemeral());
    assert_eq!(renderer.previous_entries().len(), 1);
}

#[test]
fn one_spacer_per_part_and_one_entry_per_span() {
    let mut renderer = renderer();
    let envelope = ResponseEnvelope::new(vec![
        part(&["a", "b", "c"]),
        part(&[]),
        part(&["d"]),
    ]);

    renderer.render(&envelope);

    let transcript = renderer.surface();
    assert_eq!(spacer_count(transcript), 3);
    assert_eq!(transcript.len(), 3 + 4);
}

#[test]
fn bold_spans_keep_their_style() {
    let mut renderer = renderer();
    let envelope = ResponseEnvelope::single(ResponsePart::new(vec![
        StyledSpan::bold("ERROR: "),
        StyledSpan::plain("nope"),
    ]));

    renderer.render(&envelope);

    let bold: Vec<bool> = renderer.surface().entries().map(|e| e.is_bold()).collect();
    assert_eq!(bold, vec![true, false, false]);
}

#[test]
fn ephemeral_part_is_retracted_by_next_render() {
    let mut renderer = renderer();

    renderer.render(&ResponseEnvelope::single(part(&["loading"]).ephemeral()));
    assert!(renderer.surface().contains_text("loading"));
    assert!(renderer.last_ephemeral());

    renderer.render(&ResponseEnvelope::single(part(&["done"])));

    let transcript = renderer.surface();
    assert!(!transcript.contains_text("loading"));
    assert!(transcript.contains_text("done"));
    assert_eq!(spacer_count(transcript), 2);
}

#[test]
fn ephemeral_chain_within_one_envelope_leaves_only_last_frame() {
    let mut renderer = renderer();
    let envelope = ResponseEnvelope::new(vec![
        part(&["10%"]).ephemeral(),
        part(&["50%"]).ephemeral(),
        part(&["100%"]),
    ]);

    renderer.render(&envelope);

    let transcript = renderer.surface();
    assert!(!transcript.contains_text("10%"));
    assert!(!transcript.contains_text("50%"));
    assert!(transcript.contains_text("100%"));
}

#[test]
fn non_ephemeral_entries_persist() {
    let mut renderer = renderer();

    renderer.render(&ResponseEnvelope::single(part(&["kept"])));
    renderer.render(&ResponseEnvelope::single(part(&["tick"]).ephemeral()));
    renderer.render(&ResponseEnvelope::single(part(&["tock"]).ephemeral()));
    renderer.render(&ResponseEnvelope::single(part(&["end"])));

    let transcript = renderer.surface();
    assert!(transcript.contains_text("kept"));
    assert!(!transcript.contains_text("tick"));
    assert!(!transcript.contains_text("tock"));
    assert!(transcript.contains_text("end"));
}

#[test]
fn retraction_skips_spacers_and_command_echo() {
    let mut renderer = renderer();

    renderer.render(&ResponseEnvelope::single(part(&["loading"]).ephemeral()));
    renderer.render_command_echo("wait");
    renderer.render(&ResponseEnvelope::single(part(&["done"])));

    assert_eq!(
        renderer.surface().texts(),
        vec!["\n", "\n> wait\n", "\n", "done", "\n"]
    );
}

#[test]
fn zero_span_part_still_retracts_and_spaces() {
    let mut renderer = renderer();

    renderer.render(&ResponseEnvelope::single(part(&["spinner"]).ephemeral()));
    renderer.render(&ResponseEnvelope::single(part(&[])));

    assert_eq!(renderer.surface().texts(), vec!["\n", "\n"]);
    assert!(renderer.previous_entries().is_empty());
    assert!(!renderer.last_ephemeral());
}

#[test]
fn command_echo_appends_line_and_spacer() {
    let mut renderer = renderer();

    renderer.render_command_echo("look");

    let transcript = renderer.surface();
    assert_eq!(transcript.texts(), vec!["\n> look\n", "\n"]);
    let command = renderer.last_command_entry().expect("command entry");
    assert_eq!(
        transcript.get(command).map(|entry| entry.kind),
        Some(EntryKind::Command)
    );
}

#[test]
fn override_prompt_rewrites_latest_command_only() {
    let mut renderer = renderer();
    renderer.render_command_echo("first");
    renderer.render_command_echo("n");

    renderer.render(&ResponseEnvelope::single(
        part(&["You walk north."]).with_override_prompt("go north"),
    ));

    assert_eq!(
        renderer.surface().texts(),
        vec![
            "\n> first\n",
            "\n",
            "\n> go north\n",
            "\n",
            "You walk north.",
            "\n"
        ]
    );
}

#[test]
fn override_prompt_without_command_echo_is_ignored() {
    let mut renderer = renderer();

    renderer.render(&ResponseEnvelope::single(
        part(&["hello"]).with_override_prompt("ignored"),
    ));

    assert_eq!(renderer.surface().texts(), vec!["hello", "\n"]);
    assert!(renderer.last_command_entry().is_none());
}

#[test]
fn empty_envelope_changes_nothing() {
    let mut renderer = renderer();
    renderer.render_command_echo("status");
    renderer.render(&ResponseEnvelope::single(part(&["busy"]).ephemeral()));

    let texts_before: Vec<String> = renderer
        .surface()
        .texts()
        .into_iter()
        .map(str::to_string)
        .collect();
    let previous_before = renderer.previous_entries().to_vec();
    let command_before = renderer.last_command_entry();

    renderer.render(&ResponseEnvelope::default());

    assert_eq!(renderer.surface().texts(), texts_before);
    assert_eq!(renderer.previous_entries(), previous_before.as_slice());
    assert_eq!(renderer.last_command_entry(), command_before);
    assert!(renderer.last_ephemeral());
}

#[test]
fn independent_renderers_do_not_share_state() {
    let mut left = renderer();
    let mut right = renderer();

    left.render(&ResponseEnvelope::single(part(&["left"]).ephemeral()));
    right.render(&ResponseEnvelope::single(part(&["right"])));

    assert!(left.last_ephemeral());
    assert!(!right.last_ephemeral());
    assert!(right.surface().contains_text("right"));
    assert!(!right.surface().contains_text("left"));
}
