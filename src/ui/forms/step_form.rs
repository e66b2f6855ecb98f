//! Wizard step form: one input box per field or entry field, plus the
//! navigation buttons

use super::field_renderer::{draw_field, FIELD_HEIGHT, MULTILINE_FIELD_HEIGHT};
use crate::app::App;
use crate::platform::{
    ADD_ENTRY_SHORTCUT, GENERATE_SHORTCUT, NEXT_SHORTCUT, PREV_SHORTCUT, REMOVE_ENTRY_SHORTCUT,
};
use crate::state::{FormRecord, InputRef, StepTable};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};
use std::ops::Range;

/// Draw the current wizard step
pub fn draw_step_form(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let wizard = &state.wizard;
    let table = wizard.table();
    let Ok(step) = table.step(wizard.current()) else {
        return;
    };

    let block = Block::default()
        .title(format!(
            " Step {}/{}: {} ",
            wizard.current() + 1,
            wizard.step_count(),
            step.title
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                // Fields
            Constraint::Length(BUTTON_HEIGHT), // Actions
        ])
        .split(inner);

    let inputs = state.current_inputs();
    let heights: Vec<u16> = inputs
        .iter()
        .map(|input| {
            if table.input_kind(*input).is_multiline() {
                MULTILINE_FIELD_HEIGHT
            } else {
                FIELD_HEIGHT
            }
        })
        .collect();

    let fields_area = chunks[0];
    let mut y = fields_area.y;
    for index in visible_window(&heights, state.active_form_field, fields_area.height) {
        let rect = Rect {
            x: fields_area.x + 1,
            y,
            width: fields_area.width.saturating_sub(2),
            height: heights[index].min(fields_area.bottom().saturating_sub(y)),
        };
        let input = inputs[index];
        draw_field(
            frame,
            rect,
            &input_label(table, input),
            input_value(wizard.record(), input),
            index == state.active_form_field,
            table.input_kind(input).is_multiline(),
        );
        y += heights[index];
    }

    draw_actions(frame, chunks[1], app);
}

fn draw_actions(frame: &mut Frame, area: Rect, app: &App) {
    let wizard = &app.state.wizard;
    let has_group = matches!(wizard.table().group_for(wizard.current()), Ok(Some(_)));
    let editing = !wizard.is_finalized();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    render_action_button(
        frame,
        chunks[0],
        PREV_SHORTCUT,
        "Back",
        editing && wizard.current() > 0,
    );
    if wizard.is_last_step() {
        render_action_button(frame, chunks[1], GENERATE_SHORTCUT, "Generate", editing);
    } else {
        render_action_button(frame, chunks[1], NEXT_SHORTCUT, "Next", editing);
    }
    render_action_button(
        frame,
        chunks[2],
        ADD_ENTRY_SHORTCUT,
        "Add",
        editing && has_group,
    );
    render_action_button(
        frame,
        chunks[3],
        REMOVE_ENTRY_SHORTCUT,
        "Remove",
        editing && has_group,
    );
}

/// Box title of an input; required inputs carry a `*`
pub fn input_label(table: &StepTable, input: InputRef) -> String {
    match input {
        InputRef::Field(id) => match table.field_spec(id) {
            Some(spec) if spec.required => format!("{} *", spec.label),
            Some(spec) => spec.label.to_string(),
            None => id.to_string(),
        },
        InputRef::Entry {
            group,
            index,
            field,
        } => {
            let Some(spec) = table.group_spec(group) else {
                return format!("{group} #{} {field}", index + 1);
            };
            match spec.field(field) {
                Some(entry) => format!(
                    "{} #{} {}{}",
                    spec.label,
                    index + 1,
                    entry.label,
                    if entry.required { " *" } else { "" }
                ),
                None => format!("{} #{} {field}", spec.label, index + 1),
            }
        }
    }
}

pub fn input_value(record: &FormRecord, input: InputRef) -> &str {
    match input {
        InputRef::Field(id) => record.field(id),
        InputRef::Entry {
            group,
            index,
            field,
        } => record
            .group(group)
            .entries()
            .get(index)
            .map_or("", |entry| entry.get(field)),
    }
}

/// Range of inputs to draw so the active one is always visible
fn visible_window(heights: &[u16], active: usize, available: u16) -> Range<usize> {
    if heights.is_empty() {
        return 0..0;
    }
    let active = active.min(heights.len() - 1);

    // walk back from the active input while it still fits
    let mut start = active;
    let mut used = heights[active];
    while start > 0 && used + heights[start - 1] <= available {
        start -= 1;
        used += heights[start];
    }

    let mut end = active + 1;
    while end < heights.len() && used + heights[end] <= available {
        used += heights[end];
        end += 1;
    }
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EntryField, FieldId, GroupId};

    mod labels {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_required_field_is_marked() {
            let table = StepTable::resume();
            assert_eq!(input_label(&table, InputRef::Field(FieldId::Name)), "Full Name *");
            assert_eq!(input_label(&table, InputRef::Field(FieldId::Headline)), "Headline");
        }

        #[test]
        fn test_entry_label_is_numbered() {
            let table = StepTable::resume();
            let input = InputRef::Entry {
                group: GroupId::Education,
                index: 1,
                field: EntryField::Cgpa,
            };
            assert_eq!(input_label(&table, input), "Education #2 CGPA *");
        }

        #[test]
        fn test_input_value_reads_record() {
            let mut record = FormRecord::new();
            record.set_field(FieldId::Email, "ada@example.com");
            record
                .set_group_field(GroupId::SocialLinks, 0, EntryField::Label, "GitHub")
                .unwrap();

            assert_eq!(input_value(&record, InputRef::Field(FieldId::Email)), "ada@example.com");
            let entry = InputRef::Entry {
                group: GroupId::SocialLinks,
                index: 0,
                field: EntryField::Label,
            };
            assert_eq!(input_value(&record, entry), "GitHub");
            let missing = InputRef::Entry {
                group: GroupId::SocialLinks,
                index: 5,
                field: EntryField::Label,
            };
            assert_eq!(input_value(&record, missing), "");
        }
    }

    mod window {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_everything_fits() {
            assert_eq!(visible_window(&[3, 3, 3], 0, 20), 0..3);
        }

        #[test]
        fn test_scrolls_to_active() {
            // 4 boxes of 3 rows, room for 2
            assert_eq!(visible_window(&[3, 3, 3, 3], 3, 6), 2..4);
            assert_eq!(visible_window(&[3, 3, 3, 3], 0, 6), 0..2);
        }

        #[test]
        fn test_active_always_drawn() {
            assert_eq!(visible_window(&[3, 6, 3], 1, 2), 1..2);
        }

        #[test]
        fn test_empty() {
            assert_eq!(visible_window(&[], 0, 10), 0..0);
        }
    }
}
