// src/app/vue.rs
//
// Vue (UI egui) - natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue, Backspace efface (quand le champ est focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Constantes : nom + valeur (la valeur est elle-même une expression)
//
// Note :
// - PAS de Key::NumEnter (n'existe pas dans egui 0.33.x)
// - Enter suffit (clavier PC + "Enter" virtuel mobile selon navigateur)

use eframe::egui;

use calculatrice_expr::noyau::eval::PROFONDEUR_MAX;
use calculatrice_expr::{Solveur, Valeur};

use super::etat::{AppCalc, Demarche};

/// Motifs retirés d'un coup par DEL / Backspace.
const MOTIFS_EFFACABLES: [&str; 16] = [
    "sqrt(", "floor(", "round(", "ceil(", "sin(", "cos(", "tan(", "exp(", "abs(", "log(", "ln(",
    "ans", "pi", "**", "//", "<<",
];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité "calc"
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice d'expressions");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultats(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_constantes(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Entrée :");

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 1+((2-3*4)/5)**6%4, floor(ln(exp(e))), 5|2^3<<2")
                .id_source("entree_edit")
                .code_editor(),
        );

        // Si on a cliqué un bouton (pavé / fonctions / DEL / C / etc.), on redonne le focus
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter évalue (seulement si le champ est focus) ---
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.eval_via_noyau();
            self.focus_entree = true;
        }

        // --- Clavier : Backspace (seulement si le champ est focus) ---
        // TextEdit gère déjà Backspace "normal" ; backspace_entree() retire
        // en plus les motifs complets ("sqrt(", "**", etc.).
        let backspace = ui.input(|i| i.key_pressed(egui::Key::Backspace));
        if resp.has_focus() && backspace {
            self.backspace_entree();
            self.focus_entree = true;
        }

        ui.add_space(6.0);

        // Actions + profondeur
        ui.horizontal(|ui| {
            // Contrat: C = entrée seulement ; CLR = résultats seulement ; AC = tout
            self.bouton_action(ui, "C", "Efface seulement l'entrée", Action::ClearEntree);
            self.bouton_action(
                ui,
                "CLR",
                "Efface résultat + erreur + démarche",
                Action::ClearResultats,
            );
            self.bouton_action(
                ui,
                "AC",
                "Remise à zéro totale (constantes et ans compris)",
                Action::ResetTotal,
            );
            self.bouton_action(
                ui,
                "Recalc",
                "Recalcule la dernière expression avec les constantes actuelles",
                Action::Recalculer,
            );

            ui.separator();

            ui.label("Imbrication :");
            let mut p = self.profondeur as u32;
            let resp = ui.add(
                egui::DragValue::new(&mut p)
                    .speed(1)
                    .range(1..=PROFONDEUR_MAX as u32)
                    .suffix(" niveaux"),
            );
            if resp.changed() {
                self.set_profondeur(p as usize);
            }
        });

        ui.add_space(8.0);

        // Opérateurs + "="
        ui.horizontal_wrapped(|ui| {
            self.bouton_insert(ui, "(", "(", InsertKind::OpenParen);
            self.bouton_insert(ui, ")", ")", InsertKind::CloseParen);

            for op in ["+", "-", "*", "/", "//", "%", "**"] {
                self.bouton_insert(ui, op, op, InsertKind::Op);
            }

            ui.separator();

            for op in ["<<", ">>", "&", "^", "|"] {
                self.bouton_insert(ui, op, op, InsertKind::Op);
            }
            self.bouton_insert(ui, "~", "~", InsertKind::Unaire);

            ui.add_space(10.0);

            let eq = ui.add_sized([64.0, 32.0], egui::Button::new("="));
            if eq.clicked() {
                self.eval_via_noyau();
                self.focus_entree = true;
            }
        });

        // Fonctions + constantes
        ui.horizontal_wrapped(|ui| {
            for f in [
                "sin", "cos", "tan", "exp", "ln", "log", "sqrt", "abs", "floor", "ceil", "round",
            ] {
                self.bouton_insert(ui, f, &format!("{f}("), InsertKind::Func);
            }

            ui.separator();

            for c in ["pi", "e", "ans"] {
                self.bouton_insert(ui, c, c, InsertKind::Word);
            }
        });

        ui.add_space(8.0);

        // Pavé numérique
        self.ui_pave_numerique(ui);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_insert(ui, "7", "7", InsertKind::Digit);
                self.bouton_insert(ui, "8", "8", InsertKind::Digit);
                self.bouton_insert(ui, "9", "9", InsertKind::Digit);
                self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);
                ui.end_row();

                self.bouton_insert(ui, "4", "4", InsertKind::Digit);
                self.bouton_insert(ui, "5", "5", InsertKind::Digit);
                self.bouton_insert(ui, "6", "6", InsertKind::Digit);
                self.bouton_insert(ui, "*", "*", InsertKind::Op);
                ui.end_row();

                self.bouton_insert(ui, "1", "1", InsertKind::Digit);
                self.bouton_insert(ui, "2", "2", InsertKind::Digit);
                self.bouton_insert(ui, "3", "3", InsertKind::Digit);
                self.bouton_insert(ui, "-", "-", InsertKind::Op);
                ui.end_row();

                self.bouton_insert(ui, "0", "0", InsertKind::Digit);
                self.bouton_insert(ui, ".", ".", InsertKind::Digit);
                ui.label("");
                self.bouton_insert(ui, "+", "+", InsertKind::Op);
                ui.end_row();
            });
    }

    /// Backspace "intelligent" : retire d'un coup les motifs utiles ("sqrt(", "**", etc.).
    fn backspace_entree(&mut self) {
        if self.entree.is_empty() {
            return;
        }

        // Retire espaces finaux
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }

        // Retire motifs connus
        for pat in MOTIFS_EFFACABLES {
            if self.entree.ends_with(pat) {
                for _ in 0..pat.chars().count() {
                    self.entree.pop();
                }
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                return;
            }
        }

        // Sinon : un caractère
        self.entree.pop();
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }
    }

    fn ui_resultats(&mut self, ui: &mut egui::Ui) {
        ui.label("Résultat :");
        Self::champ_monospace(ui, "resultat_out", &self.resultat, 2);

        ui.add_space(6.0);

        ui.label("Forme exacte :");
        Self::champ_monospace(ui, "exact_out", &self.exact, 1);
    }

    fn ui_constantes(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Constantes")
            .default_open(false)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Nom :");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.nom_constante)
                            .desired_width(80.0)
                            .id_source("constante_nom")
                            .code_editor(),
                    );
                    ui.label("=");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.valeur_constante)
                            .desired_width(160.0)
                            .hint_text("expression")
                            .id_source("constante_valeur")
                            .code_editor(),
                    );
                    if ui
                        .add_sized([72.0, 28.0], egui::Button::new("Définir"))
                        .clicked()
                    {
                        self.definir_constante();
                    }
                });

                ui.add_space(4.0);

                let liste: Vec<String> = self
                    .solveur
                    .table()
                    .liaisons()
                    .iter()
                    .map(|l| match l.valeur {
                        Some(v) => format!("{} = {}", l.nom, v),
                        None => format!("{} = (indéfini)", l.nom),
                    })
                    .collect();
                let rows = liste.len();
                Self::champ_monospace(ui, "constantes_out", &liste.join("\n"), rows);
            });
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| {
                Self::champ_demarche(
                    ui,
                    "Normalisée",
                    "demarche_normalisee",
                    &self.demarche.normalisee,
                );
                Self::champ_demarche(ui, "Blocs", "demarche_blocs", &self.demarche.blocs);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 2);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule "stable", sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.backspace_entree(),
                Action::Recalculer => self.recalcul_via_noyau(),
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str, kind: InsertKind) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if !resp.clicked() || to_insert.is_empty() {
            return;
        }

        match kind {
            InsertKind::CloseParen => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                self.entree.push_str(to_insert);
            }
            InsertKind::OpenParen | InsertKind::Func | InsertKind::Unaire => {
                if !self.entree.is_empty() {
                    let last = self.entree.chars().rev().find(|c| !c.is_whitespace());
                    if let Some(c) = last {
                        if c.is_ascii_digit() || c.is_ascii_alphabetic() || c == ')' {
                            self.entree.push(' ');
                        }
                    }
                }
                self.entree.push_str(to_insert);
            }
            InsertKind::Op => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                if !self.entree.is_empty() {
                    self.entree.push(' ');
                }
                self.entree.push_str(to_insert);
                self.entree.push(' ');
            }
            InsertKind::Digit => {
                // chiffres: pas d'espaces auto
                self.entree.push_str(to_insert);
            }
            InsertKind::Word => {
                // mots: espace si juste avant c'est un chiffre ou ')'
                if !self.entree.is_empty() && !self.entree.ends_with(char::is_whitespace) {
                    let last = self.entree.chars().rev().find(|c| !c.is_whitespace());
                    if let Some(c) = last {
                        if c.is_ascii_digit() || c == ')' {
                            self.entree.push(' ');
                        }
                    }
                }
                self.entree.push_str(to_insert);
            }
        }

        self.focus_entree = true;
    }

    /// Démarche de la dernière expression mémorisée par le solveur.
    fn demarche_courante(&self) -> Demarche {
        Demarche {
            normalisee: self
                .solveur
                .expression_normalisee()
                .unwrap_or_default()
                .to_string(),
            blocs: self.solveur.format_blocs(),
        }
    }

    /// Évalue l'entrée via le noyau, puis dépose résultat/démarche dans l'état UI.
    fn eval_via_noyau(&mut self) {
        match self.solveur.solve(&self.entree) {
            Ok(v) => {
                let d = self.demarche_courante();
                self.set_resultat(v, d);
            }
            Err(_) => {
                let msg = self.solveur.error_message().to_string();
                self.set_erreur(msg);
            }
        }
        self.focus_entree = true;
    }

    /// "Recalc" : ré-évalue la dernière expression (constantes éventuellement modifiées).
    fn recalcul_via_noyau(&mut self) {
        match self.solveur.resolve() {
            Ok(v) => {
                let d = self.demarche_courante();
                self.set_resultat(v, d);
            }
            Err(_) => {
                let msg = self.solveur.error_message().to_string();
                self.set_erreur(msg);
            }
        }
    }

    /// "Définir" : la valeur est évaluée par un solveur jetable (même réglages,
    /// mêmes constantes), pour ne pas écraser l'expression mémorisée ni `ans`.
    fn definir_constante(&mut self) {
        let mut brouillon: Solveur = self.solveur.clone();
        let valeur: Valeur = match brouillon.solve(&self.valeur_constante) {
            Ok(v) => v,
            Err(e) => {
                self.set_erreur(format!("Valeur de \"{}\" : {e}", self.nom_constante.trim()));
                return;
            }
        };

        let nom = self.nom_constante.trim().to_string();
        match self.solveur.define_constant(&nom, valeur) {
            Ok(()) => {
                self.erreur.clear();
                self.nom_constante.clear();
                self.valeur_constante.clear();
            }
            Err(e) => self.set_erreur(e.to_string()),
        }
        self.focus_entree = true;
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
    Recalculer,
}

#[derive(Clone, Copy, Debug)]
enum InsertKind {
    Digit,
    Word,
    Func,
    Unaire,
    Op,
    OpenParen,
    CloseParen,
}
