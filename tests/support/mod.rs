use configref::sections::{
    BUILD_OPTIONS, ORDERED_CATEGORIES, TOP_LEVEL_OPTIONS, TYPE_ACQUISITION_OPTIONS, WATCH_OPTIONS,
};
use configref::{CategoryKey, Layout, OptionName, Section, SectionPlan};
use serde_json::{Map, Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Reference tree on disk, removed when dropped.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn layout(&self) -> Layout {
        Layout::from_root(self.root())
    }

    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.root().join(relative);
        fs::create_dir_all(path.parent().expect("parent dir")).expect("create dirs");
        fs::write(&path, contents).expect("write fixture file");
        path
    }

    pub fn write_json(&self, relative: &str, value: &Value) -> PathBuf {
        self.write(
            relative,
            &serde_json::to_string_pretty(value).expect("serialize fixture"),
        )
    }

    pub fn read_output(&self, name: &str) -> String {
        fs::read_to_string(self.root().join("output").join(name))
            .unwrap_or_else(|err| panic!("reading output {name}: {err}"))
    }

    pub fn read_output_json(&self, name: &str) -> Value {
        serde_json::from_str(&self.read_output(name)).expect("output is JSON")
    }
}

pub fn option_md(display: &str, oneline: &str, body: &str) -> String {
    format!("---\ndisplay: \"{display}\"\noneline: \"{oneline}\"\n---\n\n{body}\n")
}

pub fn titled_md(display: &str, body: &str) -> String {
    format!("---\ndisplay: \"{display}\"\n---\n\n{body}\n")
}

fn category_entry(key: &str) -> (String, Value) {
    let code = key.rsplit_once('_').map(|(_, code)| code).expect("key has code");
    (code.to_string(), json!({"key": key, "code": code.parse::<u64>().expect("numeric code")}))
}

/// Catalog of `strict` (strict-checks category) and `target` (top level),
/// with the matching two-section plan.
pub fn strict_target_fixture() -> (Fixture, SectionPlan) {
    let fixture = Fixture::new();
    fixture.write_json(
        "data/options.json",
        &json!({"options": [
            {"name": "strict", "categoryCode": 6173, "defaultValue": "false", "recommended": true},
            {"name": "target", "categoryCode": 6254, "defaultValue": "ES5", "allowedValues": ["es5", "es2015"]}
        ]}),
    );
    let (code, entry) = category_entry("Strict_Type_Checking_Options_6173");
    let mut categories = Map::new();
    categories.insert(code, entry);
    fixture.write_json("data/categories.json", &Value::Object(categories));

    fixture.write("content/en/sections/Top Level.md", &titled_md("Top Level", "Root fields."));
    fixture.write(
        "content/en/sections/compilerOptions.md",
        &titled_md("Compiler Options", "Compiler settings."),
    );
    fixture.write(
        "content/en/categories/Strict_Type_Checking_Options_6173.md",
        &titled_md("Strict Checks", "Stricter type checking."),
    );
    fixture.write(
        "content/en/options/strict.md",
        &option_md("Strict", "Enable all strict type-checking options.", "Strict body."),
    );
    fixture.write(
        "content/en/options/target.md",
        &option_md("Target", "Set the language version for emitted output.", "Target body."),
    );

    let plan = SectionPlan {
        sections: vec![
            Section::Options {
                name: "Top Level".to_string(),
                options: vec![OptionName::from("target")],
                anchor_prefix: None,
            },
            Section::Categories {
                name: "compilerOptions".to_string(),
                categories: vec![CategoryKey::from("Strict_Type_Checking_Options_6173")],
            },
        ],
        build_options: Vec::new(),
    };
    (fixture, plan)
}

/// Full tree for `SectionPlan::standard()`: every category, every listed
/// option, and one compiler option per category.
pub fn standard_fixture() -> Fixture {
    let fixture = Fixture::new();
    let mut options = Vec::new();
    for name in TOP_LEVEL_OPTIONS
        .iter()
        .chain(WATCH_OPTIONS)
        .chain(TYPE_ACQUISITION_OPTIONS)
        .chain(BUILD_OPTIONS)
    {
        options.push(json!({"name": name, "categoryCode": 0}));
    }

    let mut categories = Map::new();
    for key in ORDERED_CATEGORIES {
        let (code, entry) = category_entry(key);
        let option_name = format!("option{code}");
        options.push(json!({"name": option_name, "categoryCode": code}));
        categories.insert(code, entry);
        fixture.write(
            &format!("content/en/categories/{key}.md"),
            &titled_md(&key.replace('_', " "), "Category intro."),
        );
        fixture.write(
            &format!("content/en/options/{option_name}.md"),
            &option_md(&option_name, "Generated option.", "Option body."),
        );
    }
    for name in TOP_LEVEL_OPTIONS
        .iter()
        .chain(WATCH_OPTIONS)
        .chain(TYPE_ACQUISITION_OPTIONS)
    {
        fixture.write(
            &format!("content/en/options/{name}.md"),
            &option_md(name, "Listed option.", "Option body."),
        );
    }
    for section in SectionPlan::standard().sections {
        fixture.write(
            &format!("content/en/sections/{}.md", section.name()),
            &titled_md(section.name(), "Section intro."),
        );
    }

    fixture.write_json("data/options.json", &json!({ "options": options }));
    fixture.write_json("data/categories.json", &Value::Object(categories));
    fixture
}
