//! Opcode names.

/// Opcodes named identically by every engine.
pub(crate) const COMMON: &[(i64, &str)] = &[
    (0, "AC bonus"),
    (1, "Modify attacks per round"),
    (2, "Cure sleep"),
    (3, "Berserk"),
    (4, "Cure berserk"),
    (5, "Charm creature"),
    (6, "Charisma bonus"),
    (7, "Set color"),
    (8, "Set color glow solid"),
    (9, "Set color glow pulse"),
    (10, "Constitution bonus"),
    (11, "Cure poison"),
    (12, "Damage"),
    (13, "Kill target"),
    (14, "Defrost"),
    (15, "Dexterity bonus"),
    (16, "Haste"),
    (17, "Current HP bonus"),
    (18, "Maximum HP bonus"),
    (19, "Intelligence bonus"),
    (20, "Invisibility"),
    (21, "Lore bonus"),
    (22, "Luck bonus"),
    (23, "Morale bonus"),
    (24, "Panic"),
    (25, "Poison"),
    (26, "Remove curse"),
    (27, "Acid resistance bonus"),
    (28, "Cold resistance bonus"),
    (29, "Electricity resistance bonus"),
    (30, "Fire resistance bonus"),
    (31, "Magic damage resistance bonus"),
    (32, "Raise dead"),
    (33, "Save vs. death bonus"),
    (34, "Save vs. wand bonus"),
    (35, "Save vs. polymorph bonus"),
    (36, "Save vs. breath bonus"),
    (37, "Save vs. spell bonus"),
    (38, "Silence"),
    (39, "Sleep"),
    (40, "Slow"),
    (41, "Sparkle"),
    (42, "Bonus wizard spells"),
    (43, "Stone to flesh"),
    (44, "Strength bonus"),
    (45, "Stun"),
    (46, "Cure stun"),
    (47, "Remove invisibility"),
    (48, "Vocalize"),
    (49, "Wisdom bonus"),
    (50, "Character color pulse"),
    (51, "Character tint solid"),
    (52, "Character tint bright"),
    (53, "Animation change"),
    (54, "Base THAC0 bonus"),
    (55, "Slay"),
    (56, "Invert alignment"),
    (57, "Change alignment"),
    (58, "Dispel effects"),
    (59, "Move silently bonus"),
    (60, "Casting failure"),
    (61, "Creature RGB color fade"),
    (62, "Bonus priest spells"),
    (63, "Infravision"),
    (64, "Remove infravision"),
    (65, "Blur"),
    (66, "Translucency"),
    (67, "Summon creature"),
    (68, "Unsummon creature"),
    (69, "Non-detection"),
    (70, "Remove non-detection"),
    (71, "Change gender"),
    (72, "Change AI type"),
    (73, "Attack damage bonus"),
    (74, "Blindness"),
    (75, "Cure blindness"),
    (76, "Feeblemindedness"),
    (77, "Cure feeblemindedness"),
    (78, "Disease"),
    (79, "Cure disease"),
    (80, "Deafness"),
    (81, "Cure deafness"),
    (82, "Set AI script"),
    (83, "Immunity to projectile"),
    (84, "Magical fire resistance bonus"),
    (85, "Magical cold resistance bonus"),
    (86, "Slashing resistance bonus"),
    (87, "Crushing resistance bonus"),
    (88, "Piercing resistance bonus"),
    (89, "Missile resistance bonus"),
    (90, "Open locks bonus"),
    (91, "Find traps bonus"),
    (92, "Pick pockets bonus"),
    (93, "Fatigue bonus"),
    (94, "Intoxication bonus"),
    (95, "Tracking bonus"),
    (96, "Change level"),
    (97, "Exceptional strength bonus"),
    (98, "Regeneration"),
    (99, "Modify duration"),
    (100, "Protection from creature type"),
    (101, "Immunity to effect"),
    (102, "Immunity to spell level"),
    (103, "Change name"),
    (104, "XP bonus"),
    (105, "Remove gold"),
    (106, "Morale break"),
    (107, "Change portrait"),
    (108, "Reputation bonus"),
    (109, "Paralyze"),
    (110, "Retreat from"),
    (111, "Create weapon"),
    (112, "Remove item"),
    (113, "Equip weapon"),
    (114, "Dither"),
    (115, "Detect alignment"),
    (116, "Cure invisibility"),
    (117, "Reveal area"),
    (118, "Show creatures"),
    (119, "Mirror image"),
    (120, "Immunity to weapons"),
    (121, "Visual animation effect"),
    (122, "Create inventory item"),
    (123, "Remove inventory item"),
    (124, "Teleport"),
    (125, "Unlock"),
    (126, "Movement rate bonus"),
    (127, "Summon monsters"),
    (128, "Confusion"),
    (129, "Aid (non-cumulative)"),
    (130, "Bless (non-cumulative)"),
    (131, "Chant (non-cumulative)"),
    (132, "Draw upon holy might (non-cumulative)"),
    (133, "Luck (non-cumulative)"),
    (134, "Petrification"),
    (135, "Polymorph"),
    (136, "Force visible"),
    (137, "Bad chant (non-cumulative)"),
    (138, "Set animation sequence"),
    (139, "Display string"),
    (140, "Casting glow"),
    (141, "Lighting effects"),
    (142, "Display portrait icon"),
    (143, "Create item in slot"),
    (144, "Disable button"),
    (145, "Disable spellcasting"),
    (146, "Cast spell"),
    (147, "Learn spell"),
    (148, "Cast spell at point"),
    (149, "Identify"),
    (150, "Find traps"),
    (151, "Replace self"),
    (152, "Play movie"),
    (153, "Sanctuary"),
    (154, "Entangle overlay"),
    (155, "Minor globe overlay"),
    (156, "Protection from normal missiles overlay"),
    (157, "Web effect"),
    (158, "Grease overlay"),
    (159, "Mirror image effect"),
    (160, "Remove sanctuary"),
    (161, "Remove fear"),
    (162, "Remove paralysis"),
    (163, "Free action"),
    (164, "Remove intoxication"),
    (165, "Pause target"),
    (166, "Magic resistance bonus"),
    (167, "Missile THAC0 bonus"),
    (168, "Remove creature"),
    (169, "Prevent portrait icon"),
    (170, "Play damage animation"),
    (171, "Give innate ability"),
    (172, "Remove spell"),
    (173, "Poison resistance bonus"),
    (174, "Play sound"),
    (175, "Hold creature"),
    (176, "Movement rate bonus 2"),
    (177, "Use EFF file"),
    (178, "THAC0 vs. type bonus"),
    (179, "Damage vs. type bonus"),
    (180, "Disallow item"),
    (181, "Disallow item type"),
    (182, "Apply effect on equip item"),
    (183, "Apply effect on equip type"),
    (184, "No collision detection"),
    (185, "Hold creature 2"),
];

/// Baldur's Gate II and the Enhanced Editions, past the common range.
pub(crate) const BG2: &[(i64, &str)] = &[
    (186, "Move creature"),
    (187, "Set local variable"),
    (188, "Increase spells cast per round"),
    (189, "Increase casting speed factor"),
    (190, "Increase attack speed factor"),
    (191, "Casting level bonus"),
    (192, "Find familiar"),
    (193, "Invisible detection"),
    (194, "Ignore dialogue pause"),
    (195, "Drain CON and HP on death"),
    (196, "Disable familiar"),
    (197, "Physical mirror"),
    (198, "Reflect specified effect"),
    (199, "Reflect spell level"),
    (200, "Spell turning"),
    (201, "Spell deflection"),
    (202, "Reflect spell school"),
    (203, "Reflect spell type"),
    (204, "Protection from spell school"),
    (205, "Protection from spell type"),
    (206, "Protection from spell"),
    (207, "Reflect specified spell"),
    (208, "Minimum HP"),
    (209, "Power word, kill"),
    (210, "Power word, stun"),
    (211, "Imprisonment"),
    (212, "Freedom"),
    (213, "Maze"),
    (214, "Select spell"),
    (215, "Play visual effect"),
    (216, "Level drain"),
    (217, "Power word, sleep"),
    (218, "Stoneskin effect"),
    (219, "Attack and saving throw roll penalty"),
    (220, "Remove spell school protections"),
    (221, "Remove spell type protections"),
    (222, "Teleport field"),
    (223, "Spell school deflection"),
    (224, "Restoration"),
    (225, "Detect magic"),
    (226, "Spell type deflection"),
    (227, "Spell school turning"),
    (228, "Spell type turning"),
    (229, "Remove protection by school"),
    (230, "Remove protection by type"),
    (231, "Time stop"),
    (232, "Cast spell on condition"),
    (233, "Modify proficiencies"),
    (234, "Create contingency"),
    (235, "Wing buffet"),
    (236, "Project image"),
    (237, "Set image type"),
    (238, "Disintegrate"),
    (239, "Farsight"),
    (240, "Remove portrait icon"),
    (241, "Control creature"),
    (242, "Cure confusion"),
    (243, "Drain item charges"),
    (244, "Drain wizard spells"),
    (245, "Check for berserk"),
    (246, "Berserk effect"),
    (247, "Attack nearest creature"),
    (248, "Melee hit effect"),
    (249, "Ranged hit effect"),
    (250, "Maximum damage each hit"),
    (251, "Change bard song"),
    (252, "Set trap"),
    (253, "Set automap note"),
    (254, "Remove automap note"),
    (255, "Create item (days)"),
    (256, "Spell sequencer"),
    (257, "Create spell sequencer"),
    (258, "Activate spell sequencer"),
    (259, "Spell trap"),
    (260, "Activate spell sequencer at point"),
    (261, "Restore lost spells"),
    (262, "Visual range bonus"),
    (263, "Backstab bonus"),
    (264, "Drop item"),
    (265, "Set global variable"),
    (266, "Remove protection from spell"),
    (267, "Disable display string"),
    (268, "Clear fog of war"),
    (269, "Shake screen"),
    (270, "Unpause target"),
    (271, "Avatar removal"),
    (272, "Apply repeating EFF"),
    (273, "Remove specific area effect"),
    (274, "Teleport to target"),
    (275, "Hide in shadows bonus"),
    (276, "Detect illusions bonus"),
    (277, "Set traps bonus"),
    (278, "THAC0 bonus"),
    (279, "Enable button"),
    (280, "Wild magic"),
    (281, "Wild surge bonus"),
    (282, "Modify script state"),
    (283, "Use EFF file as curse"),
    (284, "Melee THAC0 bonus"),
    (285, "Melee weapon damage bonus"),
    (286, "Missile weapon damage bonus"),
    (287, "Remove feet circle"),
    (288, "Fist THAC0 bonus"),
    (289, "Fist damage bonus"),
    (290, "Change title"),
    (291, "Disable visual effects"),
    (292, "Immunity to backstab"),
    (293, "Set persistent AI"),
    (294, "Set existence delay"),
    (295, "Disable permanent death"),
    (296, "Immunity to specific animation"),
    (297, "Immunity to turn undead"),
    (298, "Pocket plane"),
    (299, "Chaos shield effect"),
    (300, "Modify collision behavior"),
    (301, "Critical hit bonus"),
    (302, "Can use any item"),
    (303, "Backstab every hit"),
    (304, "Mass raise dead"),
    (305, "Off-hand THAC0 bonus"),
    (306, "Main hand THAC0 bonus"),
    (307, "Tracking"),
    (308, "Immunity to tracking"),
    (309, "Modify local variable"),
    (310, "Immunity to time stop"),
    (311, "Wish"),
    (312, "Immunity to sequester"),
    (313, "High-level ability"),
    (314, "Stoneskin protection"),
    (315, "Remove animation"),
    (316, "Rest"),
    (317, "Haste 2"),
    (318, "Protection from resource"),
];

/// Opcodes added by the Enhanced Editions.
pub(crate) const ENHANCED: &[(i64, &str)] = &[
    (319, "Item usability"),
    (320, "Change weather"),
    (321, "Remove effects by resource"),
    (323, "Turn undead level"),
    (324, "Immunity to resource and message"),
    (325, "All saving throws bonus"),
    (326, "Apply effects list"),
    (327, "Show visual effect"),
    (328, "Set state"),
    (329, "Slow poison"),
    (330, "Float text"),
    (331, "Summon creatures 2"),
    (332, "Attack type damage bonus"),
    (333, "Static charge"),
    (334, "Turn undead"),
    (335, "Seven eyes"),
    (336, "Seven eyes overlay"),
    (337, "Remove effects by opcode"),
    (338, "Disable rest or save"),
    (339, "Alter visual animation effect"),
    (340, "Backstab hit effect"),
    (341, "Critical hit effect"),
    (342, "Override creature data"),
    (343, "HP swap"),
    (344, "Enchantment vs. creature type"),
    (345, "Enchantment bonus"),
    (346, "Save vs. school bonus"),
    (347, "Move to area"),
];

/// TobEx reuses the Throne of Bhaal range above 318.
pub(crate) const TOBEX: &[(i64, &str)] = &[
    (318, "Set stat"),
    (319, "Item usability"),
    (320, "Ex: Set Stat"),
];

/// EEex opcodes on top of an Enhanced Edition.
pub(crate) const EEEX: &[(i64, &str)] = &[
    (400, "Set temporary AI script"),
    (401, "Set extended stat"),
    (402, "Invoke Lua"),
    (403, "Screen effects"),
    (404, "Override button type"),
    (405, "Override button index"),
    (406, "Render as"),
    (407, "On removal"),
    (408, "Projectile mutator"),
    (409, "Enable action listener"),
];

/// Planescape: Torment, past the common range.
pub(crate) const TORMENT: &[(i64, &str)] = &[
    (186, "Set status"),
    (187, "Play BAM file (single/dual)"),
    (188, "Play BAM file"),
    (189, "Play BAM file 2"),
    (190, "Play BAM file 3"),
    (191, "Play BAM file 4"),
    (192, "Hit point transfer"),
    (193, "Shake screen"),
    (194, "Flash screen"),
    (195, "Tint screen"),
    (196, "Special spell hit"),
    (201, "Play BAM with effects"),
    (202, "Detect evil"),
    (203, "Prayer"),
    (204, "Curse"),
    (205, "Embalm"),
    (206, "Stop all actions"),
    (207, "Fist of iron"),
    (208, "Soul exodus"),
    (209, "Detect evil 2"),
];

/// Icewind Dale and its expansions, past the shared Baldur's Gate II range.
pub(crate) const ICEWIND: &[(i64, &str)] = &[
    (232, "Creature RGB color fade"),
    (233, "Show visual effect"),
    (234, "Snilloc's snowball swarm"),
    (235, "Show casting glow"),
    (236, "Chill touch"),
    (237, "Magical stone"),
    (238, "All saving throws bonus"),
    (239, "Slow poison"),
    (240, "Summon creature 2"),
    (241, "Vampiric touch"),
    (242, "Show visual overlay"),
    (243, "Animate dead"),
    (244, "Prayer"),
    (245, "Bad prayer"),
    (246, "Summon creature 3"),
    (247, "Beltyn's burning blood"),
    (248, "Summon shadow"),
    (249, "Recitation"),
    (250, "Bad recitation"),
    (251, "Lich touch"),
    (252, "Sol's searing orb"),
    (253, "Bonus AC vs. weapons"),
    (254, "Dispel specific spell"),
    (255, "Salamander aura"),
    (256, "Umber hulk gaze"),
    (257, "Zombie lord aura"),
    (258, "Immunity to specific resource"),
    (259, "Summon creatures with cloud"),
    (260, "Hide creature"),
    (261, "Immunity to effect and string"),
    (262, "Pomab images"),
    (263, "Evil turn undead"),
    (264, "Static charge"),
    (265, "Cloak of fear"),
    (266, "Movement rate modifier"),
    (267, "Cure confusion"),
    (268, "Eye of the mind"),
    (269, "Eye of the sword"),
    (270, "Eye of the mage"),
    (271, "Eye of venom"),
    (272, "Eye of the spirit"),
    (273, "Eye of fortitude"),
    (274, "Eye of stone"),
    (275, "Remove seven eyes"),
    (276, "Remove effect by type"),
    (277, "Soul eater"),
    (278, "Shroud of flame"),
    (279, "Animal rage"),
    (280, "Turn undead"),
    (281, "Vitriolic sphere"),
    (282, "Hide hit points"),
    (283, "Float text"),
    (284, "Mace of disruption"),
    (285, "Force sleep"),
    (286, "Ranger tracking"),
    (287, "Immunity to sneak attack"),
];

/// Icewind Dale II only.
pub(crate) const ICEWIND2: &[(i64, &str)] = &[
    (288, "Set status"),
    (289, "Dragon gem cutscene"),
    (290, "Display spell immunity string"),
    (291, "Rod of smiting"),
    (292, "Rest"),
    (293, "Beholder dispel magic"),
    (294, "Harpy wail"),
    (295, "Jackalwere gaze"),
    (296, "Set global variable"),
    (400, "Hopelessness"),
    (401, "Protection from evil"),
    (402, "Apply effects list"),
    (403, "Armor of faith"),
    (404, "Nausea"),
    (405, "Enfeeblement"),
    (406, "Fire shield"),
    (407, "Death ward"),
    (408, "Holy power"),
    (409, "Righteous wrath of the faithful"),
    (410, "Summon friendly creature"),
    (411, "Summon hostile creature"),
    (412, "Control undead"),
    (413, "Visual spell hit"),
    (414, "Otiluke's resilient sphere"),
    (415, "Barkskin"),
    (416, "Bleeding wounds"),
    (417, "Area effect using effects list"),
    (418, "Free action"),
    (419, "Unconsciousness"),
    (420, "Death magic"),
    (421, "Entropy shield"),
    (422, "Storm shell"),
    (423, "Protection from the elements"),
    (424, "Hold undead"),
    (425, "Control undead 2"),
    (426, "Aegis"),
    (427, "Executioner's eyes"),
    (428, "Banish"),
    (429, "Apply effects list on hit"),
    (430, "Projectile type using effects list"),
    (431, "Energy drain"),
    (432, "Tortoise shell"),
    (433, "Blink"),
    (434, "Persistent using effects list"),
    (435, "Day blindness"),
    (436, "Damage reduction"),
    (437, "Disguise"),
    (438, "Heroic inspiration"),
    (439, "Prevent AI slowdown"),
    (440, "Barbarian rage"),
    (441, "Movement rate modifier 4"),
    (443, "Missile damage reduction"),
    (444, "Tenser's transformation"),
    (445, "Slippery mind"),
    (446, "Smite evil"),
    (447, "Restoration"),
    (448, "Alicorn lance glow"),
    (449, "Call lightning"),
    (450, "Globe of invulnerability"),
];
