//! Plain-text rendering of calculator views.

use console::style;
use shadow_core::summary::BuffLine;
use shadow_core::{
    AbilityCard, BuffCategory, Corpse, PowerPool, ScoreInput, ShadowScore, SystemState,
    TargetSummary, TierTable, next_cost,
};

pub fn score_preview(input: ScoreInput, score: &ShadowScore) {
    let c = &score.components;
    println!("{}", style("Shadow score").bold());
    println!("  Raw Might:   {} (factor {:.3})", input.raw_might, c.raw);
    println!(
        "  Proficiency: {} (factor {:.3})",
        TierTable::Proficiency.label_clamped(input.proficiency_tier),
        c.proficiency
    );
    println!(
        "  Template:    {} (factor {:.3})",
        TierTable::Template.label_clamped(input.template_tier),
        c.template
    );
    println!("  Overall:     {:.3}", c.overall);
    println!(
        "  {} {}   {} {}",
        style("SL").cyan(),
        style(score.shadow_level).bold(),
        style("SPU").cyan(),
        style(score.power_units).bold()
    );
}

pub fn shadows(state: &SystemState) {
    if state.shadows.is_empty() {
        println!("{}", style("No shadows stored yet.").dim());
        return;
    }
    for shadow in &state.shadows {
        let status = if shadow.active {
            style("active").green()
        } else {
            style("inactive").dim()
        };
        println!(
            "{} {}: SL {} · {} SPU · {}",
            style(&shadow.id).dim(),
            style(&shadow.name).bold(),
            shadow.shadow_level,
            shadow.power_units,
            status
        );
        println!(
            "    Raw Might {} · {} · {}",
            shadow.raw_might,
            shadow.proficiency_label(),
            shadow.template_label()
        );
        for line in &shadow.technique_lines {
            println!("    • {}", line);
        }
    }
}

pub fn pool(pool: &PowerPool) {
    println!(
        "Total SPU: {}   Spent: {}   Available: {}",
        style(pool.total).bold(),
        pool.spent,
        style(pool.available).green()
    );
    if pool.is_overdrawn() {
        println!(
            "{}",
            style(format!(
                "Overdrawn by {} SPU; deactivated shadows no longer cover existing buffs.",
                pool.spent - pool.total
            ))
            .yellow()
        );
    }
}

pub fn targets(state: &SystemState) {
    for target in state.targets.iter() {
        let marker = if target.id == state.ui.current_target {
            style("*").green().bold()
        } else {
            style(" ")
        };
        println!(
            "{} {} {} ({})",
            marker,
            style(&target.id).dim(),
            style(&target.name).bold(),
            target.kind.label()
        );
    }
}

pub fn catalog(state: &SystemState) {
    let stacks = state.current_target().map(|t| &t.stacks);
    if let Some(target) = state.current_target() {
        println!("Buffs for {}:", style(&target.name).bold());
    }
    for def in state.catalog.iter() {
        let held = stacks.map_or(0, |s| s.get(def.id.as_str()));
        println!(
            "  {:<22} {:<34} [{}] base {} · next {}{}",
            def.id.as_str(),
            def.name,
            def.category,
            def.base_cost,
            next_cost(def.base_cost, held),
            if held > 0 {
                format!(" · ×{}", held)
            } else {
                String::new()
            }
        );
        if !def.description.is_empty() {
            println!("  {:<22} {}", "", style(&def.description).dim());
        }
    }
}

/// Helper panels under the buff list, as chosen with `prefs tools`.
pub fn buff_tools(state: &SystemState) {
    let view = state.ui.buff_tools_view;
    if view.shows_custom() {
        let custom = state
            .catalog
            .iter()
            .filter(|def| def.category == BuffCategory::Custom)
            .count();
        println!();
        println!("{}", style("Custom buffs").bold());
        println!(
            "  {} in catalog. Add one with `buff add-custom <name> <cost> [description]`.",
            custom
        );
    }
    if view.shows_dc() {
        println!();
        println!("{}", style("Shadow DC").bold());
        match state.ui.shadow_dc() {
            Some(dc) => println!("  Last suggested DC: {}", style(dc).bold()),
            None => println!("  {}", style("Not computed yet. Run `dc --sl <level>`.").dim()),
        }
    }
}

pub fn stack_lines(lines: &[BuffLine]) {
    if lines.is_empty() {
        println!("{}", style("No buffs allocated.").dim());
        return;
    }
    for line in lines {
        println!(
            "  {} ×{}: spent {} · next copy {}",
            line.name, line.count, line.spent, line.next_cost
        );
        if let Some(effect) = &line.effect {
            println!("    {}", style(effect).dim());
        }
    }
}

pub fn corpse(corpse: &Corpse, state: &SystemState) {
    let s = &corpse.stats;
    let powering = corpse.powering(&state.shadows);

    println!("{}", style(&corpse.name).bold().underlined());
    println!("Medium undead (reanimated corpse)");
    println!(
        "Armor Class {} · Hit Points {} · Speed {} ft.",
        s.armor_class, s.hit_points, s.speed
    );
    let scores: Vec<String> = shadow_core::Ability::ALL
        .iter()
        .map(|&ability| {
            let score = s.ability(ability);
            format!(
                "{} {} ({:+})",
                ability,
                score,
                shadow_core::corpse::ability_modifier(score)
            )
        })
        .collect();
    println!("{}", scores.join("  "));

    println!();
    println!("{}", style("Traits").cyan().bold());
    for line in corpse.traits(powering.len()) {
        println!("  {}", line);
    }
    println!("{}", style("Actions").cyan().bold());
    for line in corpse.actions() {
        println!("  {}", line);
    }
    println!("{}", style("Inherited Techniques").cyan().bold());
    if corpse.inherited_techniques.is_empty() {
        println!("  {}", style(shadow_core::summary::NO_INHERITED_TECHNIQUES).dim());
    }
    for line in &corpse.inherited_techniques {
        println!("  • {}", line);
    }
}

pub fn card(card: &AbilityCard, state: &SystemState) {
    let target = state
        .targets
        .get(card.target_id.as_str())
        .map_or(card.target_id.as_str(), |t| t.name.as_str());
    let name = if card.name.is_empty() {
        "(untitled)"
    } else {
        card.name.as_str()
    };
    println!(
        "{} {} → {}",
        style(&card.id).dim(),
        style(name).bold(),
        target
    );
    if !card.role.is_empty() {
        println!("    Role: {}", card.role);
    }
    println!("    {}", card.copy_text().replace('\n', "\n    "));
}

pub fn summary(summary: &TargetSummary) {
    println!(
        "{} {}",
        style(&summary.name).bold(),
        style(format!("[{}]", summary.label)).dim()
    );
    println!("  {}", summary.armor_class);
    println!("  {}", summary.hit_points);
    println!("  {}", summary.speed);
    println!("  {}", summary.shadow_power);
    println!("  {}", summary.shadow_dc);

    println!("  {}", style("At a glance").cyan());
    if summary.glance.is_empty() {
        println!("    {}", style(shadow_core::summary::NO_BUFFS_YET).dim());
    }
    for (label, pieces) in summary.glance.groups() {
        println!("    {}: {}", label, pieces.join("; "));
    }

    println!("  {}", style("Special powers").cyan());
    if summary.powers.is_empty() {
        println!("    {}", style(shadow_core::summary::NO_SPECIAL_POWERS).dim());
    }
    for power in &summary.powers {
        println!("    • {}", power);
    }

    println!("  {}", style("Abilities").cyan());
    if summary.abilities.is_empty() {
        println!("    {}", style(shadow_core::summary::NO_ABILITY_CARDS).dim());
    }
    for ability in &summary.abilities {
        println!("    • {}", ability);
    }

    if let Some(techniques) = &summary.inherited_techniques {
        println!("  {}", style("Inherited techniques").cyan());
        if techniques.is_empty() {
            println!("    {}", style(shadow_core::summary::NO_INHERITED_TECHNIQUES).dim());
        }
        for technique in techniques {
            println!("    • {}", technique);
        }
    }

    println!("  {}", style("Buff breakdown").cyan());
    if summary.breakdown.is_empty() {
        println!("    {}", style(shadow_core::summary::NO_BUFFS_YET).dim());
    }
    for line in &summary.breakdown {
        println!("    {}", line);
    }

    println!("  {}", style("Notes / Rulings").cyan());
    println!("    {}", summary.notes);
}
