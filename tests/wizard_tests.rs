//! Wizard integration tests
//!
//! End-to-end flows through the controller, the section store, document
//! assembly and export.

use std::io::Read;
use std::time::Duration;

use erdf::document::{Block, EMPTY_SECTION};
use erdf::draft::INPUT_MARKER;
use erdf::{
    Dashboard, DocumentAssembler, DraftGenerator, GeneratedText, RawInput, Resolved, Section, Step,
    StepForm, WizardController, WizardError, WizardSession,
};

fn controller() -> WizardController {
    WizardController::with_latency(Duration::ZERO)
}

fn session() -> WizardSession {
    WizardSession::new("applicant@example.com")
}

/// Generate every step that produces a draft
fn generate_all(controller: &WizardController, session: &mut WizardSession) {
    for &step in Step::all().iter().filter(|s| s.generates()) {
        let input = match step {
            Step::RiskAnalysis => RawInput::Selection(vec![
                "Low participation".to_string(),
                "Budget overrun".to_string(),
                "Tech delays".to_string(),
            ]),
            Step::InternalPolicies => RawInput::Upload(vec!["policy.pdf".to_string()]),
            Step::WorkPackages => RawInput::Empty,
            _ => RawInput::text(format!("Input for {}", step.label())),
        };
        controller.request_generation(session, step, input);
    }
}

fn document_xml(bytes: Vec<u8>) -> String {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .unwrap()
        .read_to_string(&mut xml)
        .unwrap();
    xml
}

// =============================================================================
// Navigation
// =============================================================================

mod navigation_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_retreat_then_advance_returns_to_step() {
        let c = controller();
        for &target in Step::all() {
            let mut s = session();
            while s.step() != target {
                c.advance(&mut s);
            }

            c.retreat(&mut s);
            c.advance(&mut s);

            // At step 0 the retreat is a no-op, so the advance moves on by one
            let expected = if target == Step::first() {
                Step::from_index(1).unwrap()
            } else {
                target
            };
            assert_eq!(s.step(), expected);
        }
    }

    #[test]
    fn test_navigation_stays_in_range() {
        let c = controller();
        let mut s = session();

        for _ in 0..20 {
            c.advance(&mut s);
        }
        assert_eq!(s.step(), Step::last());
        assert_eq!(s.step().index(), Step::COUNT - 1);

        for _ in 0..20 {
            c.retreat(&mut s);
        }
        assert_eq!(s.step(), Step::first());
    }

    #[test]
    fn test_confirmation_only_on_final_step() {
        let c = controller();
        let mut s = session();
        assert!(!c.confirm_submission(&mut s));
        assert!(!s.is_complete());

        while s.step() != Step::last() {
            c.advance(&mut s);
        }
        assert!(c.confirm_submission(&mut s));
        assert!(s.is_complete());
    }
}

// =============================================================================
// Generation
// =============================================================================

mod generation_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generation_is_deterministic() {
        let generator = DraftGenerator::new();
        for &step in Step::all() {
            let first = generator.generate_text(step.label(), Some("same input"));
            let second = generator.generate_text(step.label(), Some("same input"));
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_tabular_labels_have_fixed_columns() {
        let generator = DraftGenerator::new();
        for (step, columns) in [
            (Step::WorkPackages, 6),
            (Step::Organisation, 4),
            (Step::RiskAnalysis, 5),
            (Step::CommunicationPlan, 5),
        ] {
            let draft = generator.generate(step.label(), None);
            assert!(draft.is_table(), "{} should be tabular", step.label());

            let text = draft.to_markdown();
            let row = text
                .lines()
                .find(|line| line.starts_with('|') && !line.contains("---"))
                .unwrap();
            // "| a | b |" has columns + 1 pipes
            assert_eq!(row.matches('|').count(), columns + 1, "{}", step.label());
        }
    }

    #[test]
    fn test_scenario_a_echoes_basic_info_input() {
        let c = controller();
        let mut s = session();

        let text = c.request_generation(
            &mut s,
            Step::BasicInfo,
            RawInput::text("Solar microgrid for rural schools"),
        );

        let echo = format!("{} Solar microgrid for rural schools", INPUT_MARKER);
        assert!(text.starts_with(&echo));
        let rest = text[echo.len()..].trim();
        let label = "**AI-generated draft for Project Start and Basic Info:**";
        assert!(rest.starts_with(label));
        assert!(!rest[label.len()..].trim().is_empty());
    }

    #[test]
    fn test_scenario_b_work_package_table() {
        let c = controller();
        let mut s = session();
        c.request_generation(&mut s, Step::WorkPackages, RawInput::Empty);

        let rows = match s.sections.generated(Step::WorkPackages) {
            Some(GeneratedText::Draft(draft)) => draft.table.as_ref().unwrap().all_rows(),
            other => panic!("expected a structured draft, got {:?}", other),
        };

        assert_eq!(
            rows[0],
            vec![
                "WP No.",
                "Work Package Name",
                "Leader",
                "Start Month",
                "End Month",
                "Deliverables"
            ]
        );
        assert_eq!(rows.len() - 1, 4);
    }

    #[test]
    fn test_empty_input_is_not_echoed() {
        let c = controller();
        let mut s = session();
        let text = c.request_generation(&mut s, Step::WorkPackages, RawInput::Empty);
        assert!(!text.contains(INPUT_MARKER));
    }

    #[test]
    fn test_upload_step_uses_sentinel() {
        let c = controller();
        let mut s = session();
        let text = c.request_generation(
            &mut s,
            Step::InternalPolicies,
            RawInput::Upload(vec!["code_of_conduct.pdf".to_string()]),
        );
        assert!(text.contains("**Your input:** Policy documents uploaded"));
    }

    #[test]
    fn test_invalid_form_is_rejected_before_capture() {
        let c = controller();
        let mut s = session();
        let form = StepForm::BasicInfo {
            project_name: "SunSchools".to_string(),
            region: "Region West".to_string(),
            programme: "Smart Growth".to_string(),
            idea: "Solar".to_string(),
        };

        let err = c.submit_form(&mut s, &form).unwrap_err();
        assert!(matches!(err, WizardError::InvalidInput { .. }));
        assert!(s.sections.raw_input(Step::BasicInfo).is_none());
        assert!(s.project.is_none());
    }
}

// =============================================================================
// Edit precedence
// =============================================================================

mod edit_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_edit_shadows_generated_for_any_fallback() {
        let c = controller();
        let mut s = session();
        generate_all(&c, &mut s);

        Dashboard::new().save_section(&mut s, Section::TargetGroup, "Edited target group");

        for &fallback in Step::all() {
            assert_eq!(
                s.sections.resolve(Section::TargetGroup, fallback),
                Resolved::Edited("Edited target group")
            );
        }
    }

    #[test]
    fn test_regeneration_keeps_edit() {
        let c = controller();
        let mut s = session();
        c.request_generation(&mut s, Step::TargetGroup, RawInput::text("first"));
        Dashboard::new().save_section(&mut s, Section::TargetGroup, "Kept");

        c.request_generation(&mut s, Step::TargetGroup, RawInput::text("second"));

        assert_eq!(s.sections.edited(Section::TargetGroup), Some("Kept"));
        assert!(s
            .sections
            .generated(Step::TargetGroup)
            .unwrap()
            .as_markdown()
            .contains("second"));
    }

    #[test]
    fn test_scenario_c_revised_risk_text_in_preview() {
        let c = controller();
        let mut s = session();
        generate_all(&c, &mut s);
        let dashboard = Dashboard::new();

        dashboard.save_section(&mut s, Section::RiskAnalysis, "Revised risk text");

        let preview = dashboard.full_preview(&s).unwrap();
        assert!(preview.contains("## 5. Risk Analysis\n\nRevised risk text"));
        assert!(!preview.contains("Delays in partner deliverables"));
        assert_eq!(
            dashboard.section_view(&s, Section::RiskAnalysis).content,
            "Revised risk text"
        );
    }

    #[test]
    fn test_wizard_edit_writes_both_views() {
        let c = controller();
        let mut s = session();
        c.request_generation(&mut s, Step::RiskAnalysis, RawInput::Empty);

        assert!(c.record_edit(&mut s, Step::RiskAnalysis, "Revised risk text"));
        assert_eq!(s.sections.edited(Section::RiskAnalysis), Some("Revised risk text"));
        assert_eq!(
            s.sections.generated(Step::RiskAnalysis).unwrap().as_markdown(),
            "Revised risk text"
        );

        // Same text again is not an edit
        assert!(!c.record_edit(&mut s, Step::RiskAnalysis, "Revised risk text"));
    }
}

// =============================================================================
// Work packages
// =============================================================================

mod work_package_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scenario_d_templates_append_in_order() {
        let c = controller();
        let mut s = session();
        c.request_generation(&mut s, Step::WorkPackages, RawInput::Empty);
        assert!(c.templates_available(&s));

        c.add_template(&mut s, "Pilot Lab");
        c.add_template(&mut s, "SME Coaching");

        let names: Vec<&str> = s.work_packages().iter().map(|wp| wp.name.as_str()).collect();
        assert_eq!(names, vec!["Pilot Lab", "SME Coaching"]);
        assert_eq!(
            s.work_packages()[0].description,
            "AI-generated description for Pilot Lab"
        );
        assert_eq!(
            s.work_packages()[1].description,
            "AI-generated description for SME Coaching"
        );
    }

    #[test]
    fn test_templates_need_generated_work_packages() {
        let s = session();
        assert!(!controller().templates_available(&s));
    }
}

// =============================================================================
// Document assembly and export
// =============================================================================

mod export_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_markers_never_reach_output() {
        let c = controller();
        let mut s = session();
        generate_all(&c, &mut s);

        // An edit pasted straight from the draft editor still carries markers
        let pasted = DraftGenerator::new().generate_text(
            Step::CommunicationPlan.label(),
            Some("Newsletters for SMEs"),
        );
        Dashboard::new().save_section(&mut s, Section::CommunicationPlan, &pasted);

        let dashboard = Dashboard::new();
        let preview = dashboard.full_preview(&s).unwrap();
        let xml = document_xml(dashboard.export_docx(&s).unwrap());
        let plain = dashboard.document(&s).plain_text();

        for output in [&preview, &xml, &plain] {
            assert!(!output.contains("**Your input:**"));
            assert!(!output.contains("Your input:"));
            assert!(!output.contains("AI-generated draft for"));
        }
    }

    #[test]
    fn test_tightly_packed_markers_never_reach_output() {
        let mut s = session();
        let dashboard = Dashboard::new();
        dashboard.save_section(
            &mut s,
            Section::TargetGroup,
            "**Your input:** Rural SMEs\n**AI-generated draft for Target Group:**\nBody",
        );

        let preview = dashboard.full_preview(&s).unwrap();
        let xml = document_xml(dashboard.export_docx(&s).unwrap());

        for output in [&preview, &xml] {
            assert!(!output.contains("Your input:"));
            assert!(!output.contains("AI-generated draft for"));
            assert!(!output.contains("Rural SMEs"));
        }
        assert!(preview.contains("## 3. Target Group\n\nBody"));
    }

    #[test]
    fn test_pasted_table_stays_a_table() {
        let c = controller();
        let mut s = session();
        let pasted = DraftGenerator::new().generate_text(Step::CommunicationPlan.label(), None);
        c.request_generation(&mut s, Step::CommunicationPlan, RawInput::Empty);
        Dashboard::new().save_section(&mut s, Section::CommunicationPlan, &pasted);

        let blocks = DocumentAssembler::new(&s.sections)
            .section_blocks(Section::CommunicationPlan, Step::CommunicationPlan);
        let table = blocks.iter().find_map(|b| match b {
            Block::Table(rows) => Some(rows),
            _ => None,
        });
        assert_eq!(table.map(|rows| rows.len()), Some(4));
    }

    #[test]
    fn test_missing_sections_get_placeholder() {
        let s = session();
        let document = Dashboard::new().document(&s);

        assert_eq!(document.sections.len(), 7);
        for section in &document.sections {
            assert_eq!(section.blocks, vec![Block::Note(EMPTY_SECTION.to_string())]);
        }

        let preview = Dashboard::new().full_preview(&s).unwrap();
        assert!(preview.contains("*No content provided for this section*"));
    }

    #[test]
    fn test_section_titles_in_order() {
        let document = Dashboard::new().document(&session());
        let titles: Vec<&str> = document.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "1. Project Summary",
                "2. Challenges and Needs",
                "3. Target Group",
                "4. Organisation Structure",
                "5. Risk Analysis",
                "6. Communication Plan",
                "7. Internal Policies",
            ]
        );
    }

    #[test]
    fn test_export_writes_docx_without_touching_session() {
        let c = controller();
        let mut s = session();
        generate_all(&c, &mut s);
        let before = serde_json::to_string(&s).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ERDF_Application.docx");
        let written = Dashboard::new().export_to(&s, &path).unwrap();

        assert_eq!(written as u64, std::fs::metadata(&path).unwrap().len());
        assert_eq!(serde_json::to_string(&s).unwrap(), before);

        let xml = document_xml(std::fs::read(&path).unwrap());
        assert!(xml.contains("ERDF Application"));
        assert!(xml.contains("Prof. Smith"));
    }

    #[test]
    fn test_control_characters_fail_export_cleanly() {
        let mut s = session();
        let dashboard = Dashboard::new();
        dashboard.save_section(&mut s, Section::RiskAnalysis, "Risk\u{1}text\u{b}more");
        let before = serde_json::to_string(&s).unwrap();

        assert!(matches!(dashboard.export_docx(&s), Err(WizardError::Export(_))));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ERDF_Application.docx");
        assert!(dashboard.export_to(&s, &path).is_err());
        assert!(!path.exists());
        assert_eq!(serde_json::to_string(&s).unwrap(), before);
    }

    #[test]
    fn test_export_is_deterministic() {
        let c = controller();
        let mut s = session();
        generate_all(&c, &mut s);

        let dashboard = Dashboard::new();
        assert_eq!(dashboard.export_docx(&s).unwrap(), dashboard.export_docx(&s).unwrap());
    }
}

// =============================================================================
// Session snapshot
// =============================================================================

mod session_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_snapshot_survives_reload() {
        let c = controller();
        let mut s = session();
        generate_all(&c, &mut s);
        c.add_template(&mut s, "Pilot Lab");
        Dashboard::new().save_section(&mut s, Section::RiskAnalysis, "Revised risk text");
        c.advance(&mut s);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".erdf").join("session.json");
        s.save(&path).unwrap();

        let loaded = WizardSession::load_or_new(&path, "someone@example.com").unwrap();
        assert_eq!(loaded.id, s.id);
        assert_eq!(loaded.user, "applicant@example.com");
        assert_eq!(loaded.step(), s.step());
        assert_eq!(loaded.work_packages(), s.work_packages());
        assert_eq!(
            Dashboard::new().full_preview(&loaded).unwrap(),
            Dashboard::new().full_preview(&s).unwrap()
        );
    }
}
