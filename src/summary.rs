//! The Unity Game Builder project summary report.
//!
//! [`generate_project_summary`] is the one-shot entry point used by the command line: it
//! declares the report styles, appends the fixed content and renders it to
//! `Unity_Game_Builder_Project_Summary_<YYYYMMDD>.pdf`.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};

use crate::builder::DocumentBuilder;
use crate::error::Result;
use crate::model::{Block, CellRange, TableCommand, TableData};
use crate::output::{default_file_name, Artifact, CollisionPolicy, OutputTarget};
use crate::render::PdfRenderer;
use crate::style::{Alignment, Color, StyleOverrides};

/// File name prefix of the generated report.
pub const DEFAULT_PREFIX: &str = "Unity_Game_Builder_Project_Summary";

const CHECK_MARK: &str = "\u{2713}";
const INCH: f64 = 72.0;

type Group = (&'static str, &'static [&'static str]);

/// Settings for [`generate_project_summary`].
#[derive(Clone, Debug)]
pub struct SummaryOptions {
    /// Date printed on the title page and used in the default file name.
    pub date: NaiveDate,
    /// Destination; defaults to the conventional file name in the working directory.
    pub output: Option<PathBuf>,
    pub collision: CollisionPolicy,
    pub page_numbers: bool,
    /// Directory searched first for the font family.
    pub fonts_dir: Option<PathBuf>,
    /// Embed a PDF outline of the numbered sections.
    #[cfg(feature = "bookmarks")]
    pub outline: bool,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            date: Local::now().date_naive(),
            output: None,
            collision: CollisionPolicy::default(),
            page_numbers: false,
            fonts_dir: None,
            #[cfg(feature = "bookmarks")]
            outline: false,
        }
    }
}

impl SummaryOptions {
    /// The path the report will be written to.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(default_file_name(DEFAULT_PREFIX, self.date)))
    }
}

/// Builds and renders the project summary.
pub fn generate_project_summary(options: &SummaryOptions) -> Result<Artifact> {
    let mut builder = DocumentBuilder::new()
        .with_title("Unity Game Builder Project Summary")
        .with_page_numbers(options.page_numbers);
    project_summary(&mut builder, options.date)?;

    let mut renderer = PdfRenderer::new();
    if let Some(directory) = &options.fonts_dir {
        renderer = renderer.with_fonts_dir(directory);
    }
    #[cfg(feature = "bookmarks")]
    {
        renderer = renderer.with_outline(options.outline);
    }

    let target = OutputTarget::new(options.output_path()).with_collision_policy(options.collision);
    builder.render_with(&mut renderer, target)
}

/// Declares the report styles on top of the sample sheet.
pub fn define_report_styles(builder: &mut DocumentBuilder) -> Result<()> {
    builder.define_style(
        "CustomTitle",
        "Heading1",
        StyleOverrides::new()
            .font_size(24.0)
            .leading(28.0)
            .color(Color::rgb(0x1a, 0x23, 0x7e))
            .space_after(30.0)
            .alignment(Alignment::Center)
            .bold(true),
    )?;
    builder.define_style(
        "CustomHeading1",
        "Heading1",
        StyleOverrides::new()
            .font_size(16.0)
            .color(Color::rgb(0x28, 0x35, 0x93))
            .space_before(12.0)
            .space_after(12.0)
            .bold(true),
    )?;
    builder.define_style(
        "CustomHeading2",
        "Heading2",
        StyleOverrides::new()
            .font_size(14.0)
            .color(Color::rgb(0x39, 0x49, 0xab))
            .space_before(8.0)
            .space_after(8.0)
            .bold(true),
    )?;
    builder.define_style(
        "CustomNormal",
        "Normal",
        StyleOverrides::new()
            .font_size(11.0)
            .leading(14.0)
            .space_after(6.0)
            .alignment(Alignment::Justify),
    )?;
    builder.define_style(
        "CustomBullet",
        "Normal",
        StyleOverrides::new()
            .font_size(11.0)
            .space_after(4.0)
            .left_indent(20.0)
            .bullet_indent(10.0),
    )?;
    Ok(())
}

/// Appends the complete report, dated `date`, to `builder`.
pub fn project_summary(builder: &mut DocumentBuilder, date: NaiveDate) -> Result<()> {
    define_report_styles(builder)?;
    let mut report = Report { builder };

    report.title_page(date)?;
    report.overview()?;
    report.architecture()?;
    report.responsibilities()?;
    report.section("4. How to Implement")?;
    report.groups(PHASES)?;
    report.builder.append(Block::page_break())?;
    report.section("5. Technology Stack")?;
    report.groups(TECH_STACK)?;
    report.builder.append(Block::page_break())?;
    report.section("6. Key Features")?;
    report.bullet_groups(&[USER_FEATURES, SYSTEM_FEATURES], None)?;
    report.builder.append(Block::page_break())?;
    report.workflow()?;
    report.section("8. Dependencies & Coordination")?;
    report.bullet_groups(&[UNITY_REQUIREMENTS, INFRASTRUCTURE], None)?;
    report.builder.append(Block::page_break())?;
    report.timeline()?;
    report.section("10. Risks & Considerations")?;
    report.bullet_groups(&[TECHNICAL_RISKS, SECURITY, SCALABILITY], None)?;
    report.builder.append(Block::page_break())?;
    report.section("11. Future Enhancements (Optional)")?;
    report.bullets(ENHANCEMENTS, None)?;
    report.builder.append(Block::page_break())?;
    report.section("12. Success Criteria")?;
    report.bullet_groups(&[FUNCTIONAL, NON_FUNCTIONAL], Some(CHECK_MARK))?;
    report.builder.append(Block::page_break())?;
    report.section("13. Deliverables")?;
    report.groups(DELIVERABLES)?;
    report.builder.append(Block::page_break())?;
    report.section("14. Next Steps")?;
    report.bullet_groups(&[IMMEDIATE, WEEK_ONE, WEEK_TWO], None)?;
    report.builder.append(Block::page_break())?;
    report.closing()?;
    Ok(())
}

struct Report<'a> {
    builder: &'a mut DocumentBuilder,
}

impl Report<'_> {
    fn append(&mut self, block: Block) -> Result<()> {
        self.builder.append(block)?;
        Ok(())
    }

    fn section(&mut self, title: &str) -> Result<()> {
        self.append(Block::heading(1, title).styled("CustomHeading1"))
    }

    fn subheading(&mut self, title: &str) -> Result<()> {
        self.append(Block::heading(2, format!("<b>{title}</b>")).styled("CustomHeading2"))
    }

    fn paragraph(&mut self, text: &str) -> Result<()> {
        self.append(Block::paragraph(text).styled("CustomNormal"))
    }

    fn bullets(&mut self, items: &[&str], glyph: Option<&str>) -> Result<()> {
        for item in items {
            let block = match glyph {
                Some(glyph) => Block::bullet_with(glyph, *item),
                None => Block::bullet(*item),
            };
            self.append(block.styled("CustomBullet"))?;
        }
        Ok(())
    }

    /// Subheaded bullet lists each followed by a small gap.
    fn groups(&mut self, groups: &[Group]) -> Result<()> {
        for (title, items) in groups {
            self.subheading(title)?;
            self.bullets(items, None)?;
            self.append(Block::spacer(0.05 * INCH))?;
        }
        Ok(())
    }

    /// Subheaded bullet lists separated by a gap.
    fn bullet_groups(&mut self, groups: &[Group], glyph: Option<&str>) -> Result<()> {
        for (index, (title, items)) in groups.iter().enumerate() {
            if index > 0 {
                self.append(Block::spacer(0.1 * INCH))?;
            }
            self.subheading(title)?;
            self.bullets(items, glyph)?;
        }
        Ok(())
    }

    fn title_page(&mut self, date: NaiveDate) -> Result<()> {
        self.append(Block::title("Unity Game Builder Project").styled("CustomTitle"))?;
        self.append(Block::title("Custom 3D Model Upload System").styled("CustomTitle"))?;
        self.append(Block::spacer(0.2 * INCH))?;
        self.append(Block::paragraph(format!(
            "<i>Generated on: {}</i>",
            date.format("%B %d, %Y")
        )))?;
        self.append(Block::page_break())
    }

    fn overview(&mut self) -> Result<()> {
        self.section("1. Project Overview")?;
        self.subheading("What We Want to Achieve")?;
        self.paragraph(
            "Build a web-based system that allows users to upload custom 3D character models via a \
             website, automatically replace placeholder models in a Unity project on the server, \
             trigger automated builds to generate game executables, and download the customized \
             game to play on their machines.",
        )?;
        self.append(Block::spacer(0.1 * INCH))?;
        self.subheading("Business Value")?;
        self.bullets(
            &[
                "Customization: Users can personalize games with their own 3D models",
                "Automation: No manual Unity work required for each custom build",
                "Scalability: Multiple users can create custom builds simultaneously",
                "User Experience: Simple web interface accessible to non-technical users",
            ],
            None,
        )?;
        self.append(Block::page_break())
    }

    fn architecture(&mut self) -> Result<()> {
        self.section("2. System Architecture")?;
        self.paragraph(
            "The system consists of three main components: a web frontend for user interaction, \
             a backend API server for processing, and the Unity project with build automation.",
        )?;
        self.paragraph(
            "<b>User's Browser</b> \u{2192} Web Interface (HTML/CSS/JavaScript)\
             <br/>\u{2193} HTTP Requests\
             <br/><b>Backend API Server</b> (Node.js) \u{2192} File Upload, Build Trigger, \
             Status Tracking\
             <br/>\u{2193} File Operations &amp; Command Execution\
             <br/><b>Unity Project</b> \u{2192} Model Replacement \u{2192} \
             Unity Editor CLI \u{2192} \
             Build Output (.exe)",
        )?;
        self.append(Block::page_break())
    }

    fn responsibilities(&mut self) -> Result<()> {
        self.section("3. What Needs to Be Done")?;
        self.subheading("My Responsibilities (Backend/Web Developer)")?;
        self.groups(RESPONSIBILITIES)?;
        self.append(Block::spacer(0.1 * INCH))?;
        self.subheading(UNITY_TASKS.0)?;
        self.bullets(UNITY_TASKS.1, None)?;
        self.append(Block::page_break())
    }

    fn workflow(&mut self) -> Result<()> {
        self.section("7. Workflow Example")?;
        for (number, step) in WORKFLOW.iter().enumerate() {
            let bullet = Block::bullet_with(format!("{}.", number + 1), *step);
            self.append(bullet.styled("CustomBullet"))?;
        }
        self.append(Block::page_break())
    }

    fn timeline(&mut self) -> Result<()> {
        self.section("9. Timeline Estimate")?;
        self.append(Block::table(timeline_table()))?;
        self.append(Block::page_break())
    }

    fn closing(&mut self) -> Result<()> {
        self.section("Summary")?;
        self.paragraph(
            "This project creates a web-based system for customizing Unity games with \
             user-uploaded 3D models. The backend handles file uploads, model replacement, and \
             automated builds. The frontend provides a simple interface for users. Implementation \
             takes approximately 8-12 days, with coordination needed from the Unity developer for \
             configuration and testing.",
        )?;
        self.append(Block::spacer(0.1 * INCH))?;
        self.paragraph(
            "The system automates the entire customization and build process, making it \
             accessible to non-technical users while maintaining the flexibility of Unity game \
             development.",
        )
    }
}

/// The phase timeline with its header band, beige body and alternating row backgrounds.
pub fn timeline_table() -> TableData {
    TableData::new(
        ["Phase", "Task", "Duration", "Dependencies"],
        [
            ["1", "Setup & Configuration", "1-2 days", "Unity dev provides config"],
            ["2", "Backend Development", "3-4 days", "Phase 1 complete"],
            ["3", "Frontend Development", "2-3 days", "Backend API ready"],
            ["4", "Integration & Testing", "2-3 days", "All components ready"],
            ["Total", "", "8-12 days", ""],
        ],
    )
    .with_column_widths(vec![0.5 * INCH, 2.5 * INCH, 1.2 * INCH, 2.3 * INCH])
    .with_rules(Vec::new())
    .with_rule(
        CellRange::header(),
        TableCommand::Background(Color::rgb(0x39, 0x49, 0xab)),
    )
    .with_rule(CellRange::header(), TableCommand::TextColor(Color::WHITESMOKE))
    .with_rule(CellRange::all(), TableCommand::Align(Alignment::Left))
    .with_rule(CellRange::header(), TableCommand::Bold(true))
    .with_rule(CellRange::header(), TableCommand::FontSize(10.0))
    .with_rule(CellRange::header(), TableCommand::BottomPadding(12.0))
    .with_rule(
        CellRange::new((0, 1), (-1, -2)),
        TableCommand::Background(Color::BEIGE),
    )
    .with_rule(
        CellRange::all(),
        TableCommand::Grid(crate::model::Stroke::new(1.0, Color::BLACK)),
    )
    .with_rule(CellRange::body(), TableCommand::FontSize(9.0))
    .with_rule(
        CellRange::body(),
        TableCommand::RowBackgrounds(vec![Color::WHITE, Color::LIGHTGREY]),
    )
}

const RESPONSIBILITIES: &[Group] = &[
    (
        "A. Backend API Development",
        &[
            "Create Node.js/Express server",
            "Implement file upload handling (multer)",
            "Implement model replacement logic",
            "Implement Unity build trigger (command-line execution)",
            "Implement build status tracking system",
            "Implement file download serving",
            "Error handling and logging",
        ],
    ),
    (
        "B. Web Frontend Development",
        &[
            "Create upload interface (drag &amp; drop + file picker)",
            "Create build trigger UI",
            "Create download interface",
            "Implement status/progress display",
            "Implement polling for build status",
            "User feedback and error messages",
        ],
    ),
    (
        "C. File Management",
        &[
            "Organize uploaded model storage",
            "Manage Unity project file paths",
            "Handle build output storage",
            "Implement file cleanup (optional)",
        ],
    ),
    (
        "D. Integration &amp; Testing",
        &[
            "Coordinate with Unity developer for configuration",
            "Test end-to-end workflow",
            "Handle edge cases and errors",
            "Performance optimization",
        ],
    ),
];

const UNITY_TASKS: Group = (
    "Unity Developer's Responsibilities",
    &[
        "Create Unity build script (BuildScript.cs)",
        "Configure Unity project structure",
        "Set up model import settings",
        "Configure build settings",
        "Provide configuration details (paths, method names, etc.)",
        "Test Unity build process independently",
    ],
);

const PHASES: &[Group] = &[
    (
        "Phase 1: Setup &amp; Configuration (1-2 days)",
        &[
            "Get information from Unity developer (paths, configurations)",
            "Initialize Node.js project and install dependencies",
            "Create project structure (server, frontend, config files)",
        ],
    ),
    (
        "Phase 2: Backend Development (3-4 days)",
        &[
            "Create server with file upload endpoint",
            "Implement model replacement logic",
            "Implement build trigger with Unity CLI",
            "Implement status tracking system",
            "Implement download service",
        ],
    ),
    (
        "Phase 3: Frontend Development (2-3 days)",
        &[
            "Create upload interface with drag &amp; drop",
            "Create build trigger UI",
            "Create download interface",
            "Implement status polling for real-time updates",
        ],
    ),
    (
        "Phase 4: Integration &amp; Testing (2-3 days)",
        &[
            "Integration testing with Unity developer",
            "Error handling and edge cases",
            "Security and optimization",
            "Final testing and bug fixes",
        ],
    ),
];

const TECH_STACK: &[Group] = &[
    (
        "Backend",
        &[
            "Node.js - Runtime environment",
            "Express.js - Web framework",
            "Multer - File upload handling",
            "fs-extra - Enhanced file system operations",
            "child_process - Execute Unity build commands",
        ],
    ),
    (
        "Frontend",
        &[
            "HTML5 - Structure",
            "CSS3 - Styling",
            "JavaScript (Vanilla) - Interactivity",
            "Fetch API - HTTP requests",
        ],
    ),
    (
        "Infrastructure",
        &[
            "File System - Store uploaded models and builds",
            "Unity Editor CLI - Automated builds",
            "Web Server - Serve API and frontend",
        ],
    ),
];

const USER_FEATURES: Group = (
    "User Features",
    &[
        "Drag &amp; drop 3D model upload",
        "Real-time upload progress",
        "One-click build trigger",
        "Build status monitoring",
        "Direct executable download",
        "Clear error messages",
    ],
);

const SYSTEM_FEATURES: Group = (
    "System Features",
    &[
        "Automatic model replacement",
        "Automated Unity builds",
        "Build status tracking",
        "File validation",
        "Error handling",
        "Logging",
    ],
);

const WORKFLOW: &[&str] = &[
    "User opens website",
    "User uploads 3D model (.fbx file) \u{2192} Backend validates and stores",
    "Backend replaces model in Unity project \u{2192} Copies to Assets/Models/Character.fbx",
    "User clicks 'Build Game' \u{2192} Backend triggers Unity build command",
    "Frontend polls build status \u{2192} Shows 'Building...' status every 2 seconds",
    "Build completes \u{2192} Backend detects .exe file \u{2192} Updates status to 'completed'",
    "User downloads game \u{2192} Backend streams .exe file \u{2192} User saves and plays",
];

const UNITY_REQUIREMENTS: Group = (
    "Required from Unity Developer",
    &[
        "Unity project access (read/write permissions)",
        "Unity Editor installation path",
        "Build script implementation",
        "Configuration details (paths, method names)",
        "Testing support",
    ],
);

const INFRASTRUCTURE: Group = (
    "Required Infrastructure",
    &[
        "Server with Node.js installed",
        "File system access to Unity project",
        "Unity Editor installed on server",
        "Sufficient disk space for builds",
        "Network access for web interface",
    ],
);

const TECHNICAL_RISKS: Group = (
    "Technical Risks",
    &[
        "Unity build failures - Need proper error handling",
        "File system permissions - Ensure proper access rights",
        "Large file uploads - Implement size limits and validation",
        "Build time variability - Implement proper status polling",
        "Concurrent builds - May need queue system for multiple users",
    ],
);

const SECURITY: Group = (
    "Security Considerations",
    &[
        "File upload validation - Prevent malicious files",
        "Path traversal protection - Validate file paths",
        "Rate limiting - Prevent abuse",
        "Authentication (future) - Control who can build",
        "File cleanup - Manage disk space",
    ],
);

const SCALABILITY: Group = (
    "Scalability Considerations",
    &[
        "Multiple concurrent builds - May need job queue (Bull/Redis)",
        "Storage management - Cleanup old builds",
        "Database for build tracking (optional - currently in-memory)",
        "Load balancing (if multiple servers)",
    ],
);

const ENHANCEMENTS: &[&str] = &[
    "User authentication system",
    "Build history and management",
    "Multiple model uploads (characters, props, etc.)",
    "Build customization options (game settings, levels)",
    "Email notifications when build completes",
    "Build queue system for multiple users",
    "Analytics and usage tracking",
    "Docker containerization for easier deployment",
];

const FUNCTIONAL: Group = (
    "Functional Requirements",
    &[
        "Users can upload 3D models successfully",
        "Models are correctly replaced in Unity project",
        "Build process completes successfully",
        "Users can download working executables",
        "System handles errors gracefully",
    ],
);

const NON_FUNCTIONAL: Group = (
    "Non-Functional Requirements",
    &[
        "Upload completes in reasonable time (&lt; 1 min for typical files)",
        "Build status updates in real-time",
        "System is stable and doesn't crash",
        "Error messages are user-friendly",
        "Code is maintainable and documented",
    ],
);

const DELIVERABLES: &[Group] = &[
    (
        "Backend API Server",
        &[
            "Complete Node.js/Express server",
            "All API endpoints implemented",
            "Error handling and logging",
        ],
    ),
    (
        "Web Frontend",
        &[
            "Complete HTML/CSS/JavaScript interface",
            "Responsive design",
            "User-friendly UI/UX",
        ],
    ),
    (
        "Documentation",
        &[
            "API documentation",
            "Setup instructions",
            "Configuration guide",
            "Deployment guide",
        ],
    ),
    (
        "Testing",
        &[
            "Integration tests",
            "End-to-end workflow verification",
            "Error scenario testing",
        ],
    ),
];

const IMMEDIATE: Group = (
    "Immediate Actions:",
    &[
        "Get configuration details from Unity developer",
        "Set up development environment",
        "Create project structure",
    ],
);

const WEEK_ONE: Group = (
    "Week 1:",
    &[
        "Complete backend API development",
        "Basic frontend implementation",
        "Initial testing",
    ],
);

const WEEK_TWO: Group = (
    "Week 2:",
    &[
        "Complete frontend development",
        "Integration with Unity developer",
        "End-to-end testing",
        "Bug fixes and refinements",
    ],
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FixedWidthMetrics;
    use crate::model::BlockKind;

    fn report() -> DocumentBuilder {
        let mut builder = DocumentBuilder::new();
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        project_summary(&mut builder, date).unwrap();
        builder
    }

    #[test]
    fn default_output_path_uses_prefix_and_date() {
        let options = SummaryOptions {
            date: NaiveDate::from_ymd_opt(2024, 11, 30).unwrap(),
            ..SummaryOptions::default()
        };
        assert_eq!(
            options.output_path(),
            PathBuf::from("Unity_Game_Builder_Project_Summary_20241130.pdf")
        );
    }

    #[test]
    fn report_has_every_numbered_section_in_order() {
        let builder = report();
        let sections: Vec<&str> = builder
            .items()
            .iter()
            .filter_map(|item| match item.block() {
                Block::Heading { text, level: 1, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(sections.len(), 15);
        assert_eq!(sections[0], "1. Project Overview");
        assert_eq!(sections[8], "9. Timeline Estimate");
        assert_eq!(sections[13], "14. Next Steps");
        assert_eq!(sections[14], "Summary");
    }

    #[test]
    fn title_page_carries_the_generation_date() {
        let builder = report();
        let dated = builder.items().iter().any(|item| match item.block() {
            Block::Paragraph { text, .. } => text.contains("January 05, 2024"),
            _ => false,
        });
        assert!(dated);
    }

    #[test]
    fn every_section_starts_on_its_own_page() {
        let document = report().finish();
        let plan = document.paginate(&FixedWidthMetrics::default());
        let section_pages: Vec<usize> = plan
            .placements()
            .iter()
            .zip(document.items())
            .filter(|(_, item)| matches!(item.block(), Block::Heading { level: 1, .. }))
            .map(|(placement, _)| placement.first_page)
            .collect();
        assert!(section_pages.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(plan.page_count() >= 16);
        assert_eq!(plan.outline().len(), 17);
    }

    #[test]
    fn timeline_table_matches_the_phase_plan() {
        let table = timeline_table();
        assert_eq!(table.column_count(), 4);
        assert_eq!(table.row_count(), 6);
        assert_eq!(table.cell(2, 5), "8-12 days");
        let document = {
            let mut builder = DocumentBuilder::new();
            builder.append(Block::table(table)).unwrap();
            builder.finish()
        };
        let plan = document.paginate(&FixedWidthMetrics::default());
        assert_eq!(plan.placements()[0].kind, BlockKind::Table);
        assert_eq!(plan.page_count(), 1);
    }
}
