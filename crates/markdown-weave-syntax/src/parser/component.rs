//! `::Name{props}` component blocks and their `#slot` regions.

use std::collections::BTreeMap;

use super::{Parser, block::block};
use crate::ast::{Block, Component};
use crate::props::parse_props;
use crate::token::{TokenKind, TokenMeta};

pub(super) fn component(p: &mut Parser<'_>) -> Option<Block> {
    let token = p.peek()?;
    let TokenMeta::Component {
        name,
        props,
        self_closing,
    } = &token.meta
    else {
        return None;
    };
    p.bump();

    let mut node = Component {
        name: name.clone(),
        props: parse_props(props),
        children: Vec::new(),
        slots: BTreeMap::new(),
        self_closing: *self_closing,
    };
    if node.self_closing {
        return Some(Block::Component(node));
    }

    p.enter_component();
    let mut active_slot: Option<String> = None;
    loop {
        match p.current() {
            TokenKind::BlankLine => {
                p.bump();
            }
            TokenKind::ComponentEnd => {
                p.bump();
                break;
            }
            TokenKind::EndOfInput => {
                log::debug!(
                    "component {} opened at line {} is never closed",
                    node.name,
                    token.start.line
                );
                break;
            }
            TokenKind::SlotMarker => {
                if let Some(TokenMeta::Slot { name }) = p.bump().map(|t| &t.meta) {
                    node.slots.entry(name.clone()).or_default();
                    active_slot = Some(name.clone());
                }
            }
            _ => match block(p) {
                Some(child) => match &active_slot {
                    Some(slot) => node.slots.entry(slot.clone()).or_default().push(child),
                    None => node.children.push(child),
                },
                None => p.skip_unmatched(),
            },
        }
    }
    p.leave_component();

    Some(Block::Component(node))
}
