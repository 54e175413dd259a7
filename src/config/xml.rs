// src/config/xml.rs

//! Liquid-style XML job scripts.
//!
//! ```xml
//! <renderscript>
//!   <title>shot010</title>
//!   <minservers>1</minservers>
//!   <subtasks>
//!     <task>
//!       <title>Beauty_Frame0001</title>
//!       <subtasks>
//!         <task>
//!           <title>Shadow_Frame0001</title>
//!           <commands><command remote="0">prman shadow.0001.rib</command></commands>
//!         </task>
//!       </subtasks>
//!       <commands><command remote="0">prman beauty.0001.rib</command></commands>
//!     </task>
//!   </subtasks>
//! </renderscript>
//! ```
//!
//! Only `title`, `subtasks`, `task`, `commands` and `command` carry meaning.
//! Other elements (`minservers`, `cleanup`, `chaser`, ...) are skipped. The
//! XML form has no `[config]` section, so the defaults apply.

use roxmltree::{Document, Node};

use crate::config::model::{ConfigSection, RawJobDocument, RawSubtaskBlock, RawTask};
use crate::errors::Result;

/// Map an XML job script onto a [`RawJobDocument`].
///
/// Missing titles and empty `<command>` elements are kept as gaps so that
/// validation reports them with the node path.
pub fn parse_xml(contents: &str) -> Result<RawJobDocument> {
    let doc = Document::parse(contents)?;
    let root = doc.root_element();

    Ok(RawJobDocument {
        title: child_text(root, "title"),
        config: ConfigSection::default(),
        task: elements(root, "subtasks").flat_map(tasks_of).collect(),
    })
}

fn tasks_of(block: Node<'_, '_>) -> Vec<RawTask> {
    elements(block, "task").map(raw_task).collect()
}

fn raw_task(node: Node<'_, '_>) -> RawTask {
    RawTask {
        title: child_text(node, "title"),
        subtasks: elements(node, "subtasks")
            .map(|block| RawSubtaskBlock {
                task: tasks_of(block),
            })
            .collect(),
        // Each <command> is its own command group.
        commands: elements(node, "commands")
            .flat_map(|group| elements(group, "command"))
            .map(|cmd| cmd.text().map(str::trim).unwrap_or_default().to_string())
            .collect(),
    }
}

fn elements<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && child.has_tag_name(tag))
}

fn child_text(node: Node<'_, '_>, tag: &'static str) -> Option<String> {
    elements(node, tag)
        .next()
        .and_then(|title| title.text())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
